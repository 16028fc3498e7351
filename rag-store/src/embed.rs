use futures::future::BoxFuture;

use crate::errors::RagError;

/// Asynchronous embedding provider.
///
/// Implement this trait to plug in an embedding backend. Documents and queries
/// are separate calls because asymmetric models embed them differently.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds corpus chunks; output order matches input order.
    fn embed_documents<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>>;

    /// Embeds a single search query.
    fn embed_query<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}

pub mod llm_embedder;
