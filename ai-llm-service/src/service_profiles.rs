//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - HTTP clients are built eagerly so bad config fails startup, not the first request.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{
//!     config::default_config::{config_azure_chat, config_cohere_embedding},
//!     error_handler::process_env,
//!     service_profiles::LlmServiceProfiles,
//! };
//!
//! # async fn run() -> Result<(), ai_llm_service::error_handler::AiLlmError> {
//! let chat = config_azure_chat(&process_env)?;
//! let embedding = config_cohere_embedding(&process_env)?;
//! let svc = Arc::new(LlmServiceProfiles::new(chat, embedding)?);
//!
//! let out = svc.generate("Hello world").await?;
//! println!("{}", out.content);
//!
//! let emb = svc.embed_query("Ferris").await?;
//! println!("Embedding dim = {}", emb.len());
//! # Ok(()) }
//! ```

use futures::future::BoxFuture;

use crate::{
    chat_model::{ChatCompletion, ChatModel},
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ProviderError, ProviderErrorKind},
    services::{
        azure_openai_service::AzureOpenAiService,
        cohere_service::{CohereService, EmbedInputType},
    },
};

/// Shared service holding the chat and embedding clients.
pub struct LlmServiceProfiles {
    embedding_cfg: LlmModelConfig,

    chat: AzureOpenAiService,
    embedding: CohereService,
}

impl LlmServiceProfiles {
    /// Creates the service and both underlying HTTP clients.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either config is rejected by its client.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat: AzureOpenAiService::new(chat)?,
            embedding: CohereService::new(embedding.clone())?,
            embedding_cfg: embedding,
        })
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str) -> Result<ChatCompletion, AiLlmError> {
        self.chat.generate(prompt).await
    }

    /// Embeds corpus chunks using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AiLlmError> {
        self.embedding
            .embed(texts, EmbedInputType::SearchDocument)
            .await
    }

    /// Embeds a single search query using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails or the provider returns nothing.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, AiLlmError> {
        let batch = [text.to_string()];
        self.embedding
            .embed(&batch, EmbedInputType::SearchQuery)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::new(
                    self.embedding_cfg.provider,
                    ProviderErrorKind::Decode("empty embeddings response".into()),
                )
                .into()
            })
    }
}

impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
        Box::pin(self.generate(prompt))
    }
}
