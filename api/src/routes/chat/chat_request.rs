use contextor::ChatMode;
use serde::Deserialize;

/// Request payload for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    /// `"rag"` or `"agent"`; agent when omitted or null.
    #[serde(default)]
    pub mode: Option<ChatMode>,
}
