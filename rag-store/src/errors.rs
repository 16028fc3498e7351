//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// I/O or filesystem errors (reading the corpus).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors surfaced by the LLM service (embedding calls, env parsing).
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    /// Embedding backend failed without an LLM-service error to wrap.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality across chunks or queries.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// The corpus produced no chunks to index.
    #[error("corpus {0} produced no chunks")]
    EmptyCorpus(String),
}
