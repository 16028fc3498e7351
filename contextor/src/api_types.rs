//! Public API types re-used by external crates (e.g., the HTTP API layer).

use std::fmt;

use ai_llm_service::TokenUsage;
use rag_store::RagHit;
use serde::{Deserialize, Serialize};
use web_search::SearchResult;

/// Operating mode of a chat request.
///
/// `Rag` answers from the FAQ index only; `Agent` may also dispatch tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Rag,
    #[default]
    Agent,
}

impl ChatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Rag => "rag",
            ChatMode::Agent => "agent",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retrieved chunk as returned to clients.
///
/// # Example
/// ```
/// use contextor::ContextChunk;
/// let c = ContextChunk::new("Widgets ship in 3 days.", "faq.txt", 0, 0.91);
/// let v = serde_json::to_value(&c).unwrap();
/// assert_eq!(v["pageContent"], "Widgets ship in 3 days.");
/// assert_eq!(v["metadata"]["source"], "faq.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextChunk {
    pub page_content: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkMetadata {
    pub source: String,
    pub chunk: usize,
    pub score: f32,
}

impl ContextChunk {
    pub fn new(text: impl Into<String>, source: impl Into<String>, chunk: usize, score: f32) -> Self {
        Self {
            page_content: text.into(),
            metadata: ChunkMetadata {
                source: source.into(),
                chunk,
                score,
            },
        }
    }
}

impl From<RagHit> for ContextChunk {
    fn from(h: RagHit) -> Self {
        Self::new(h.text, h.source, h.chunk, h.score)
    }
}

/// Full response to one chat request. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer: String,
    /// Chunks fed to the model; absent on the CGPA path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<ContextChunk>>,
    pub usage: TokenUsage,
    /// `null` unless agent mode produced at least one search result.
    pub web_results: Option<Vec<SearchResult>>,
    pub mode: ChatMode,
}
