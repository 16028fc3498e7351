//! Chat gateway: routes a question to the CGPA tool, web search and the FAQ
//! retriever, then composes one prompt for the chat model.
//!
//! Request flow for [`ChatService::query`]:
//! 1. Plan tools with [`router::ToolRouter`] (agent mode only)
//! 2. CGPA questions short-circuit into [`gpa::handle_request`]
//! 3. Optional web search and a best-effort summary call
//! 4. Top-K retrieval from the shared index
//! 5. Final model call; usage from the provider or a local estimate

pub mod api_types;
pub mod cfg;
pub mod error;
pub mod gpa;
pub mod prompt;
pub mod router;
pub mod usage;

use std::sync::Arc;

use ai_llm_service::ChatModel;
use rag_store::Retriever;
use tracing::{debug, info, instrument, warn};
use web_search::{SearchResult, WebSearch};

pub use api_types::{Answer, ChatMode, ChunkMetadata, ContextChunk};
pub use cfg::ContextorConfig;
pub use error::ContextorError;
pub use router::{ToolPlan, ToolRouter};

/// Shared per-process chat service. Cheap to share behind `Arc`; holds no
/// per-request state.
pub struct ChatService {
    llm: Arc<dyn ChatModel>,
    retriever: Retriever,
    search: Arc<dyn WebSearch>,
    router: ToolRouter,
}

impl ChatService {
    pub fn new(
        llm: Arc<dyn ChatModel>,
        retriever: Retriever,
        search: Arc<dyn WebSearch>,
        cfg: &ContextorConfig,
    ) -> Self {
        Self {
            llm,
            retriever,
            search,
            router: ToolRouter::new(cfg),
        }
    }

    /// Answers `question` in the given mode.
    ///
    /// # Errors
    /// Retrieval or final model failures. Web search, web summary and CGPA
    /// failures are absorbed and never surface here.
    #[instrument(skip_all, fields(mode = %mode, q_len = question.len()))]
    pub async fn query(&self, question: &str, mode: ChatMode) -> Result<Answer, ContextorError> {
        let plan = self.router.plan(question, mode);
        debug!(?plan, "tool plan");

        if plan.gpa {
            info!("routing to cgpa tool");
            return Ok(gpa::handle_request(self.llm.as_ref(), question).await);
        }

        let web_results = if plan.web_search {
            self.search.search(question).await
        } else {
            Vec::new()
        };
        let web_summary = self.summarize_web(question, &web_results).await;

        let hits = self.retriever.retrieve(question).await?;
        let context = prompt::join_context(&hits);

        let final_prompt = match mode {
            ChatMode::Rag => prompt::build_rag_prompt(&context, question),
            ChatMode::Agent => prompt::build_agent_prompt(
                &context,
                question,
                &web_results,
                web_summary.as_deref(),
            ),
        };

        let completion = self.llm.complete(&final_prompt).await?;
        let usage = completion
            .usage
            .unwrap_or_else(|| usage::estimate_chat_usage(question, &context, &completion.content));

        info!(
            hits = hits.len(),
            web_results = web_results.len(),
            total_tokens = usage.total_tokens,
            "answer ready"
        );

        Ok(Answer {
            answer: completion.content,
            context: Some(hits.into_iter().map(ContextChunk::from).collect()),
            usage,
            web_results: (!web_results.is_empty()).then_some(web_results),
            mode,
        })
    }

    async fn summarize_web(&self, question: &str, results: &[SearchResult]) -> Option<String> {
        if results.is_empty() {
            return None;
        }
        let summary_prompt = prompt::build_web_summary_prompt(question, results);
        match self.llm.complete(&summary_prompt).await {
            Ok(out) => Some(format!("Web search summary: {}", out.content)),
            Err(e) => {
                warn!(error = %e, "web summary failed; continuing without it");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use ai_llm_service::{
        AiLlmError, ChatCompletion, TokenUsage,
        config::llm_provider::LlmProvider,
        error_handler::{ProviderError, ProviderErrorKind},
    };
    use futures::future::BoxFuture;
    use rag_store::{Document, EmbeddingsProvider, MemoryVectorStore, RagError};

    use super::*;

    /// Replays scripted replies in order and records every prompt.
    struct ScriptedLlm {
        replies: Mutex<VecDeque<Result<ChatCompletion, AiLlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<ChatCompletion, AiLlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::default(),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl ChatModel for ScriptedLlm {
        fn complete<'a>(
            &'a self,
            prompt: &'a str,
        ) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(upstream_failure()));
            Box::pin(async move { reply })
        }
    }

    struct FixedSearch {
        results: Vec<SearchResult>,
        calls: AtomicUsize,
    }

    impl FixedSearch {
        fn new(results: Vec<SearchResult>) -> Self {
            Self {
                results,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl WebSearch for FixedSearch {
        fn search<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let out = self.results.clone();
            Box::pin(async move { out })
        }
    }

    struct ConstEmbedder;

    impl EmbeddingsProvider for ConstEmbedder {
        fn embed_documents<'a>(
            &'a self,
            texts: &'a [String],
        ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
            Box::pin(async move { Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect()) })
        }

        fn embed_query<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            Box::pin(async { Ok(vec![1.0, 0.0]) })
        }
    }

    fn upstream_failure() -> AiLlmError {
        ProviderError::new(LlmProvider::AzureOpenAi, ProviderErrorKind::EmptyChoices).into()
    }

    fn reply(text: &str) -> Result<ChatCompletion, AiLlmError> {
        Ok(ChatCompletion {
            content: text.to_string(),
            usage: None,
        })
    }

    fn retriever() -> Retriever {
        let pairs = ["Widgets ship in 3 days.", "Returns within 30 days."]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                (
                    Document {
                        text: t.to_string(),
                        source: "widget-faq.txt".into(),
                        chunk: i,
                    },
                    vec![1.0, 0.0],
                )
            })
            .collect();
        let store = MemoryVectorStore::from_embedded(pairs).unwrap();
        Retriever::new(Arc::new(store), Arc::new(ConstEmbedder), 3)
    }

    fn service(llm: Arc<ScriptedLlm>, search: Arc<FixedSearch>) -> ChatService {
        ChatService::new(llm, retriever(), search, &ContextorConfig::default())
    }

    fn news() -> Vec<SearchResult> {
        vec![SearchResult {
            title: "Widget 2 launch".into(),
            snippet: "Widget 2 is available today.".into(),
            link: "https://example.com/widget-2".into(),
        }]
    }

    #[tokio::test]
    async fn agent_web_question_uses_results_and_summary() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            reply("Widget 2 launched."),
            reply("Widget 2 is out now."),
        ]));
        let search = Arc::new(FixedSearch::new(news()));
        let svc = service(llm.clone(), search.clone());

        let a = svc.query("What is the latest widget?", ChatMode::Agent).await.unwrap();

        assert_eq!(a.answer, "Widget 2 is out now.");
        assert_eq!(a.web_results, Some(news()));
        assert_eq!(a.mode, ChatMode::Agent);
        assert_eq!(a.context.as_ref().map(Vec::len), Some(2));
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with("Below are web search results"));
        assert!(prompts[1].contains("Summary of web search: Web search summary: Widget 2 launched."));
        assert!(prompts[1].contains("[1] Widget 2 launch: Widget 2 is available today."));
    }

    #[tokio::test]
    async fn empty_search_gives_null_web_results() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply("I don't know.")]));
        let search = Arc::new(FixedSearch::new(Vec::new()));
        let svc = service(llm.clone(), search.clone());

        let a = svc.query("latest news?", ChatMode::Agent).await.unwrap();

        assert_eq!(a.web_results, None);
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        // No summary call without results.
        assert_eq!(llm.prompts().len(), 1);
        assert!(llm.prompts()[0].contains("say you don't know"));
    }

    #[tokio::test]
    async fn rag_mode_ignores_web_keywords() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply("Three days.")]));
        let search = Arc::new(FixedSearch::new(news()));
        let svc = service(llm.clone(), search.clone());

        let a = svc.query("latest shipping time?", ChatMode::Rag).await.unwrap();

        assert_eq!(a.mode, ChatMode::Rag);
        assert_eq!(a.web_results, None);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert!(llm.prompts()[0].contains("based solely on the provided context"));
        assert!(llm.prompts()[0].contains("Widgets ship in 3 days.\n\nReturns within 30 days."));
    }

    #[tokio::test]
    async fn gpa_question_short_circuits() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply(
            r#"[{"credits": 3, "points": 4}, {"credits": 2, "points": 3}]"#,
        )]));
        let search = Arc::new(FixedSearch::new(news()));
        let svc = service(llm.clone(), search.clone());

        let q = "Search my latest CGPA: 3 credits A (4.0), 2 credits B (3.0)";
        let a = svc.query(q, ChatMode::Agent).await.unwrap();

        assert_eq!(a.answer, "Based on the grades you provided, your CGPA is 3.60.");
        assert_eq!(a.mode, ChatMode::Agent);
        assert!(a.context.is_none());
        assert!(a.web_results.is_none());
        assert_eq!(a.usage.completion_tokens, 20);
        assert_eq!(a.usage.prompt_tokens, usage::estimate_tokens(q));
        // The web keyword matched too, but the CGPA path wins first.
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn gpa_answer_rounds_ties_up() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply(
            r#"[{"credits":3,"points":4},{"credits":3,"points":3},{"credits":2,"points":2}]"#,
        )]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let a = svc.query("calculate my gpa", ChatMode::Agent).await.unwrap();
        assert_eq!(a.answer, "Based on the grades you provided, your CGPA is 3.13.");
    }

    #[tokio::test]
    async fn gpa_with_unparseable_extraction_asks_for_more() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply("I am not sure.")]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let a = svc.query("what's my gpa?", ChatMode::Agent).await.unwrap();

        assert_eq!(a.answer, gpa::NEED_MORE_INFO);
        assert_eq!(a.usage.completion_tokens, 30);
        assert_eq!(a.usage.total_tokens, 30 + a.usage.prompt_tokens);
    }

    #[tokio::test]
    async fn gpa_model_failure_is_a_fixed_answer() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(upstream_failure())]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let a = svc.query("compute grade average", ChatMode::Agent).await.unwrap();
        assert_eq!(a.answer, gpa::CALCULATION_FAILED);
        assert_eq!(a.usage.completion_tokens, 20);
    }

    #[tokio::test]
    async fn local_estimate_when_provider_reports_none() {
        let llm = Arc::new(ScriptedLlm::new(vec![reply("Three days.")]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let q = "How fast is shipping?";
        let a = svc.query(q, ChatMode::Rag).await.unwrap();

        let ctx = "Widgets ship in 3 days.\n\nReturns within 30 days.";
        assert_eq!(a.usage, usage::estimate_chat_usage(q, ctx, "Three days."));
        assert_eq!(a.usage.total_tokens, a.usage.completion_tokens + a.usage.prompt_tokens);
    }

    #[tokio::test]
    async fn provider_usage_is_passed_through() {
        let reported = TokenUsage {
            completion_tokens: 7,
            prompt_tokens: 120,
            total_tokens: 127,
        };
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(ChatCompletion {
            content: "Three days.".into(),
            usage: Some(reported),
        })]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let a = svc.query("How fast is shipping?", ChatMode::Agent).await.unwrap();
        assert_eq!(a.usage, reported);
    }

    #[tokio::test]
    async fn final_call_failure_propagates() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(upstream_failure())]));
        let svc = service(llm, Arc::new(FixedSearch::new(Vec::new())));

        let err = svc.query("How fast is shipping?", ChatMode::Rag).await.unwrap_err();
        assert!(matches!(err, ContextorError::Llm(_)));
    }

    #[tokio::test]
    async fn summary_failure_is_tolerated() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(upstream_failure()), reply("Widget 2.")]));
        let search = Arc::new(FixedSearch::new(news()));
        let svc = service(llm.clone(), search);

        let a = svc.query("latest widget?", ChatMode::Agent).await.unwrap();

        assert_eq!(a.answer, "Widget 2.");
        assert!(a.web_results.is_some());
        assert!(!llm.prompts()[1].contains("Summary of web search"));
    }
}
