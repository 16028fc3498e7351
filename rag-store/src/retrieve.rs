//! Question → top-K chunks.

use std::sync::Arc;

use tracing::debug;

use crate::{
    embed::EmbeddingsProvider, errors::RagError, memory_store::MemoryVectorStore, record::RagHit,
};

/// Embeds a question and searches the shared index.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<MemoryVectorStore>,
    provider: Arc<dyn EmbeddingsProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        store: Arc<MemoryVectorStore>,
        provider: Arc<dyn EmbeddingsProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            store,
            provider,
            top_k,
        }
    }

    /// Returns the `top_k` chunks most similar to `question`.
    ///
    /// # Errors
    /// Embedding failures or a query vector of the wrong dimension.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RagHit>, RagError> {
        let qv = self.provider.embed_query(question).await?;
        let hits = self.store.similarity_search_by_vector(&qv, self.top_k)?;
        debug!(
            top_k = self.top_k,
            hits = hits.len(),
            best = hits.first().map(|h| h.score),
            "retrieve"
        );
        Ok(hits)
    }
}
