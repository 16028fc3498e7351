//! Shared LLM service: Azure OpenAI chat completions and Cohere embeddings.
//!
//! Downstream crates depend on the [`chat_model::ChatModel`] seam and on
//! [`service_profiles::LlmServiceProfiles`], which owns the HTTP clients.

pub mod chat_model;
pub mod error_handler;
pub mod service_profiles;
pub mod telemetry;

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
    pub mod llm_provider;
}

pub mod services {
    pub mod azure_openai_service;
    pub mod cohere_service;
}

pub use chat_model::{ChatCompletion, ChatModel, TokenUsage};
pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
