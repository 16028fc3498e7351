//! In-memory vector index.
//!
//! Built once at startup and read-only afterwards; share it behind an `Arc`.
//! Search is an exhaustive cosine scan, which is plenty for a single FAQ file.

use tracing::info;

use crate::{
    embed::EmbeddingsProvider,
    embed_pool,
    errors::RagError,
    record::{Document, RagHit},
};

struct StoredChunk {
    doc: Document,
    vector: Vec<f32>,
}

pub struct MemoryVectorStore {
    entries: Vec<StoredChunk>,
    dim: usize,
}

impl MemoryVectorStore {
    /// Embeds every document and builds the index.
    ///
    /// # Errors
    /// Embedding failures or inconsistent vector sizes.
    pub async fn from_documents(
        docs: Vec<Document>,
        provider: &dyn EmbeddingsProvider,
        batch_size: usize,
        concurrency: usize,
    ) -> Result<Self, RagError> {
        let texts: Vec<String> = docs.iter().map(|d| d.text.clone()).collect();
        let vectors = embed_pool::embed_all(&texts, provider, batch_size, concurrency).await?;
        let store = Self::from_embedded(docs.into_iter().zip(vectors).collect())?;
        info!(chunks = store.len(), dim = store.dim, "vector index built");
        Ok(store)
    }

    /// Builds the index from documents that already carry vectors.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] when vectors disagree on dimension.
    pub fn from_embedded(pairs: Vec<(Document, Vec<f32>)>) -> Result<Self, RagError> {
        let dim = pairs.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut entries = Vec::with_capacity(pairs.len());
        for (doc, vector) in pairs {
            if vector.len() != dim {
                return Err(RagError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dim,
                });
            }
            entries.push(StoredChunk { doc, vector });
        }
        Ok(Self { entries, dim })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns up to `k` chunks ordered by descending cosine similarity.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if `query` has the wrong dimension.
    pub fn similarity_search_by_vector(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<RagHit>, RagError> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dim {
            return Err(RagError::VectorSizeMismatch {
                got: query.len(),
                want: self.dim,
            });
        }

        let mut scored: Vec<(f32, &StoredChunk)> = self
            .entries
            .iter()
            .map(|e| (cosine(query, &e.vector), e))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(score, e)| RagHit::from_document(&e.doc, score))
            .collect())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na.sqrt() * nb.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(i: usize, text: &str) -> Document {
        Document {
            text: text.into(),
            source: "faq.txt".into(),
            chunk: i,
        }
    }

    fn store() -> MemoryVectorStore {
        MemoryVectorStore::from_embedded(vec![
            (doc(0, "shipping"), vec![1.0, 0.0, 0.0]),
            (doc(1, "returns"), vec![0.0, 1.0, 0.0]),
            (doc(2, "warranty"), vec![0.7, 0.7, 0.0]),
            (doc(3, "colors"), vec![0.0, 0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn returns_top_k_by_descending_score() {
        let hits = store()
            .similarity_search_by_vector(&[1.0, 0.1, 0.0], 3)
            .unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(names, vec!["shipping", "warranty", "returns"]);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn k_larger_than_index_returns_everything() {
        let hits = store().similarity_search_by_vector(&[0.0, 0.0, 1.0], 10).unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].text, "colors");
    }

    #[test]
    fn wrong_query_dimension_is_rejected() {
        let err = store().similarity_search_by_vector(&[1.0], 3).unwrap_err();
        assert!(matches!(err, RagError::VectorSizeMismatch { got: 1, want: 3 }));
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let res = MemoryVectorStore::from_embedded(vec![
            (doc(0, "a"), vec![1.0, 0.0]),
            (doc(1, "b"), vec![1.0]),
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine(&[2.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    }
}
