//! Errors raised inside the search client. They never leave [`WebSearch::search`].
//!
//! [`WebSearch::search`]: crate::WebSearch::search

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Network/transport failure.
    #[error("[Web Search] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("[Web Search] HTTP {status}: {snippet}")]
    HttpStatus { status: StatusCode, snippet: String },

    /// Response body was not the expected JSON.
    #[error("[Web Search] decode error: {0}")]
    Decode(String),

    /// Client could not be configured (bad key header, endpoint).
    #[error("[Web Search] config error: {0}")]
    Config(String),
}
