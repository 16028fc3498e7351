//! Corpus, chunking and retrieval configuration.

use ai_llm_service::error_handler::{EnvLookup, env_or, env_parse_or};

use crate::errors::RagError;

/// Configuration for index construction and retrieval.
#[derive(Clone, Debug, PartialEq)]
pub struct RagConfig {
    /// Path of the FAQ text file loaded at startup.
    pub faq_path: String,
    /// Maximum chunk length, in chars.
    pub chunk_size: usize,
    /// Chars carried from the end of one chunk into the next.
    pub chunk_overlap: usize,
    /// Number of chunks returned per question.
    pub top_k: usize,
    /// Texts per embedding request.
    pub embed_batch: usize,
    /// Embedding requests in flight during index construction.
    pub embed_concurrency: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            faq_path: "./data/widget-faq.txt".into(),
            chunk_size: 400,
            chunk_overlap: 40,
            top_k: 3,
            embed_batch: 96,
            embed_concurrency: 4,
        }
    }
}

impl RagConfig {
    /// Reads overrides (`FAQ_PATH`, `CHUNK_SIZE`, `CHUNK_OVERLAP`,
    /// `RETRIEVER_TOP_K`, `EMBED_BATCH_SIZE`, `EMBED_CONCURRENCY`) on top of
    /// [`RagConfig::default`] and validates the result.
    ///
    /// # Errors
    /// Unparsable numbers or values rejected by [`RagConfig::validate`].
    pub fn from_env(env: EnvLookup<'_>) -> Result<Self, RagError> {
        let d = Self::default();
        let cfg = Self {
            faq_path: env_or(env, "FAQ_PATH", &d.faq_path),
            chunk_size: env_parse_or(env, "CHUNK_SIZE", d.chunk_size, "expected usize")?,
            chunk_overlap: env_parse_or(env, "CHUNK_OVERLAP", d.chunk_overlap, "expected usize")?,
            top_k: env_parse_or(env, "RETRIEVER_TOP_K", d.top_k, "expected usize")?,
            embed_batch: env_parse_or(env, "EMBED_BATCH_SIZE", d.embed_batch, "expected usize")?,
            embed_concurrency: env_parse_or(
                env,
                "EMBED_CONCURRENCY",
                d.embed_concurrency,
                "expected usize",
            )?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.faq_path.trim().is_empty() {
            return Err(RagError::Config("faq_path is empty".into()));
        }
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.embed_batch == 0 {
            return Err(RagError::Config("embed_batch must be > 0".into()));
        }
        Ok(())
    }
}
