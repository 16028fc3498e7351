//! In-memory RAG store: corpus loading, chunking, embedding and retrieval.
//!
//! This crate provides:
//! - A recursive character splitter for plain-text corpora
//! - Batched, concurrent embedding of chunks through an [`EmbeddingsProvider`]
//! - A read-only in-memory index with cosine top-K search
//!
//! The index is built once by [`build_index`] and shared behind an `Arc`.

mod config;
mod embed;
mod embed_pool;
mod errors;
mod loader;
mod memory_store;
mod record;
mod retrieve;
mod splitter;

pub use config::RagConfig;
pub use embed::{EmbeddingsProvider, llm_embedder::LlmEmbedder};
pub use errors::RagError;
pub use loader::{load_documents, split_into_documents};
pub use memory_store::MemoryVectorStore;
pub use record::{Document, RagHit};
pub use retrieve::Retriever;
pub use splitter::RecursiveCharacterSplitter;

use tracing::info;

/// Loads the configured corpus, splits it, embeds every chunk and returns the index.
///
/// # Errors
/// Returns I/O, config, empty-corpus or embedding errors. Callers treat these as fatal.
pub async fn build_index(
    cfg: &RagConfig,
    provider: &dyn EmbeddingsProvider,
) -> Result<MemoryVectorStore, RagError> {
    info!(path = %cfg.faq_path, chunk_size = cfg.chunk_size, overlap = cfg.chunk_overlap, "building FAQ index");
    let splitter = RecursiveCharacterSplitter::new(cfg.chunk_size, cfg.chunk_overlap)?;
    let docs = load_documents(&cfg.faq_path, &splitter).await?;
    MemoryVectorStore::from_documents(docs, provider, cfg.embed_batch, cfg.embed_concurrency).await
}
