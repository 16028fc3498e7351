//! Embedding provider backed by the shared [`LlmServiceProfiles`].

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use futures::future::BoxFuture;

use crate::{EmbeddingsProvider, RagError};

/// Routes embedding calls to the service's embedding profile.
#[derive(Clone)]
pub struct LlmEmbedder {
    pub svc: Arc<LlmServiceProfiles>,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed_documents<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
        Box::pin(async move { Ok(self.svc.embed_documents(texts).await?) })
    }

    fn embed_query<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move { Ok(self.svc.embed_query(text).await?) })
    }
}
