//! Typed error for the contextor crate.

use thiserror::Error;

/// Failures of the general chat path. Tool failures (web search, CGPA) are
/// absorbed inside their tools and never show up here.
#[derive(Debug, Error)]
pub enum ContextorError {
    /// Retrieval from the FAQ index failed (query embedding, dimension).
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// The final model call failed.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),
}
