//! HTTP surface: `POST /api/chat`, opt-in `POST /api/cgpa`, and the static
//! front-end as fallback.

mod error_handler;

pub mod core {
    pub mod app_config;
    pub mod app_state;
}

mod routes {
    pub mod chat {
        pub mod chat_request;
        pub mod chat_route;
    }
    pub mod cgpa {
        pub mod cgpa_request;
        pub mod cgpa_route;
    }
}

use std::sync::Arc;

use ai_llm_service::{error_handler::process_env, service_profiles::LlmServiceProfiles};
use axum::{Router, routing::post};
use contextor::ChatService;
use rag_store::{EmbeddingsProvider, LlmEmbedder, Retriever};
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use web_search::SerperSearch;

pub use crate::error_handler::{AppError, AppResult};
use crate::{
    core::{
        app_config::{AppConfig, ServerConfig},
        app_state::AppState,
    },
    routes::{cgpa::cgpa_route::cgpa, chat::chat_route::chat},
};

/// Builds the application router.
pub fn build_router(state: Arc<AppState>, cfg: &ServerConfig) -> Router {
    let mut app = Router::new().route("/api/chat", post(chat));
    if cfg.enable_cgpa_endpoint {
        app = app.route("/api/cgpa", post(cgpa));
    }
    app.fallback_service(ServeDir::new(&cfg.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Loads config, builds the FAQ index and serves until Ctrl+C.
///
/// # Errors
/// Any startup failure: configuration, index construction, bind.
pub async fn start() -> Result<(), AppError> {
    let cfg = AppConfig::from_env(&process_env)?;

    let llm = Arc::new(LlmServiceProfiles::new(cfg.chat.clone(), cfg.embedding.clone())?);
    let embedder: Arc<dyn EmbeddingsProvider> = Arc::new(LlmEmbedder::new(llm.clone()));

    let index = rag_store::build_index(&cfg.rag, embedder.as_ref()).await?;
    info!(chunks = index.len(), dim = index.dim(), "FAQ index ready");
    let retriever = Retriever::new(Arc::new(index), embedder, cfg.rag.top_k);

    let search = Arc::new(SerperSearch::new(cfg.serper.clone())?);
    let chat_service = ChatService::new(llm, retriever, search, &cfg.contextor);

    let state = Arc::new(AppState::new(
        chat_service,
        cfg.server.expose_error_details,
    ));
    let app = build_router(state, &cfg.server);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    info!(
        %addr,
        static_dir = %cfg.server.static_dir.display(),
        cgpa_endpoint = cfg.server.enable_cgpa_endpoint,
        "server listening"
    );

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        path::PathBuf,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use ai_llm_service::{
        AiLlmError, ChatCompletion, ChatModel,
        config::llm_provider::LlmProvider,
        error_handler::{ProviderError, ProviderErrorKind},
    };
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use contextor::ContextorConfig;
    use futures::future::BoxFuture;
    use rag_store::{Document, MemoryVectorStore, RagError};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use web_search::{SearchResult, WebSearch};

    use super::*;

    struct ScriptedLlm {
        replies: Mutex<VecDeque<Result<ChatCompletion, AiLlmError>>>,
        calls: AtomicUsize,
    }

    impl ChatModel for ScriptedLlm {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(ProviderError::new(LlmProvider::AzureOpenAi, ProviderErrorKind::EmptyChoices).into())
            });
            Box::pin(async move { reply })
        }
    }

    struct NoSearch;

    impl WebSearch for NoSearch {
        fn search<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, Vec<SearchResult>> {
            Box::pin(async { Vec::new() })
        }
    }

    struct UnitEmbedder;

    impl EmbeddingsProvider for UnitEmbedder {
        fn embed_documents<'a>(
            &'a self,
            texts: &'a [String],
        ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
            Box::pin(async move { Ok(texts.iter().map(|_| vec![1.0]).collect()) })
        }

        fn embed_query<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            Box::pin(async { Ok(vec![1.0]) })
        }
    }

    fn app_with(replies: Vec<&str>, server: ServerConfig) -> (Router, Arc<ScriptedLlm>) {
        let llm = Arc::new(ScriptedLlm {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| {
                        Ok(ChatCompletion {
                            content: r.to_string(),
                            usage: None,
                        })
                    })
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        });
        let doc = Document {
            text: "Widgets ship in 3 days.".into(),
            source: "widget-faq.txt".into(),
            chunk: 0,
        };
        let store = MemoryVectorStore::from_embedded(vec![(doc, vec![1.0])]).unwrap();
        let retriever = Retriever::new(Arc::new(store), Arc::new(UnitEmbedder), 3);
        let chat = ChatService::new(
            llm.clone(),
            retriever,
            Arc::new(NoSearch),
            &ContextorConfig::default(),
        );
        let state = Arc::new(AppState::new(chat, server.expose_error_details));
        (build_router(state, &server), llm)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = ServiceExt::<Request<Body>>::oneshot(app, req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn chat_answers_in_rag_mode() {
        let (app, _) = app_with(vec!["Three days."], ServerConfig::default());
        let (status, v) = send(
            app,
            post_json("/api/chat", r#"{"question":"How fast is shipping?","mode":"rag"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["answer"], "Three days.");
        assert_eq!(v["mode"], "rag");
        assert!(v["webResults"].is_null());
        assert_eq!(v["context"][0]["pageContent"], "Widgets ship in 3 days.");
        assert_eq!(v["context"][0]["metadata"]["source"], "widget-faq.txt");
        let u = &v["usage"];
        assert_eq!(
            u["total_tokens"].as_u64().unwrap(),
            u["completion_tokens"].as_u64().unwrap() + u["prompt_tokens"].as_u64().unwrap()
        );
    }

    #[tokio::test]
    async fn mode_defaults_to_agent() {
        let (app, _) = app_with(vec!["Three days."], ServerConfig::default());
        let (status, v) = send(app, post_json("/api/chat", r#"{"question":"Shipping time?"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["mode"], "agent");
    }

    #[tokio::test]
    async fn blank_question_is_rejected_before_any_model_call() {
        let (app, llm) = app_with(vec!["unused"], ServerConfig::default());
        let (status, v) = send(app, post_json("/api/chat", r#"{"question":"   "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["code"], "BAD_REQUEST");
        assert_eq!(v["error"], "question must not be empty");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_mode_and_bad_json_are_bad_requests() {
        let (app, _) = app_with(vec![], ServerConfig::default());
        let (status, _) = send(app, post_json("/api/chat", r#"{"question":"hi","mode":"chat"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (app, _) = app_with(vec![], ServerConfig::default());
        let (status, v) = send(app, post_json("/api/chat", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn model_failure_is_500_with_optional_details() {
        let (app, _) = app_with(vec![], ServerConfig::default());
        let (status, v) = send(app, post_json("/api/chat", r#"{"question":"Shipping time?"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(v["code"], "LLM_FAILED");
        assert!(v["error"].is_string());
        assert!(v.get("details").is_none());

        let dev = ServerConfig {
            expose_error_details: true,
            ..ServerConfig::default()
        };
        let (app, _) = app_with(vec![], dev);
        let (_, v) = send(app, post_json("/api/chat", r#"{"question":"Shipping time?"}"#)).await;
        assert!(v["details"].is_string());
    }

    #[tokio::test]
    async fn gpa_question_goes_through_chat_endpoint() {
        let (app, llm) = app_with(
            vec![r#"[{"credits":3,"points":4},{"credits":2,"points":3}]"#],
            ServerConfig::default(),
        );
        let (status, v) = send(
            app,
            post_json("/api/chat", r#"{"question":"What is my GPA with A in 3 credits and B in 2?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["answer"], "Based on the grades you provided, your CGPA is 3.60.");
        assert!(v.get("context").is_none());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cgpa_endpoint_is_opt_in() {
        let (app, _) = app_with(vec![], ServerConfig::default());
        let (status, _) = send(
            app,
            post_json("/api/cgpa", r#"{"grades":[{"credits":3,"points":4}]}"#),
        )
        .await;
        assert!(matches!(
            status,
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
        ));
    }

    #[tokio::test]
    async fn cgpa_endpoint_computes_weighted_average() {
        let server = ServerConfig {
            enable_cgpa_endpoint: true,
            ..ServerConfig::default()
        };

        let (app, _) = app_with(vec![], server.clone());
        let body = json!({"grades": [{"credits": 3, "points": 4}, {"credits": 2, "points": 3}]});
        let (status, v) = send(app, post_json("/api/cgpa", &body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["cgpa"], "3.60");

        let (app, _) = app_with(vec![], server.clone());
        let body = json!({"grades": [
            {"credits": 3, "points": 4},
            {"credits": 3, "points": 3},
            {"credits": 2, "points": 2}
        ]});
        let (status, v) = send(app, post_json("/api/cgpa", &body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["cgpa"], "3.13");

        let (app, _) = app_with(vec![], server.clone());
        let (status, v) = send(app, post_json("/api/cgpa", r#"{"grades":[]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"], "Invalid grade data provided");

        let (app, _) = app_with(vec![], server);
        let (status, v) = send(app, post_json("/api/cgpa", r#"{"grades":"lots"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"], "Invalid grade data provided");
    }

    #[tokio::test]
    async fn static_front_end_is_the_fallback() {
        let dir: PathBuf = std::env::temp_dir().join(format!("faq-chat-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Widget FAQ</h1>").unwrap();

        let server = ServerConfig {
            static_dir: dir.clone(),
            ..ServerConfig::default()
        };
        let (app, _) = app_with(vec![], server);
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = ServiceExt::<Request<Body>>::oneshot(app, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Widget FAQ</h1>");

        std::fs::remove_dir_all(dir).ok();
    }
}
