//! Core data models used by the library.

use serde::Serialize;

/// One chunk of the corpus, as stored in the index.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    /// Chunk text.
    pub text: String,
    /// File the chunk came from.
    pub source: String,
    /// Zero-based position of the chunk within its source.
    pub chunk: usize,
}

/// A single retrieval hit with similarity score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RagHit {
    pub score: f32,
    pub text: String,
    pub source: String,
    pub chunk: usize,
}

impl RagHit {
    pub(crate) fn from_document(doc: &Document, score: f32) -> Self {
        Self {
            score,
            text: doc.text.clone(),
            source: doc.source.clone(),
            chunk: doc.chunk,
        }
    }
}
