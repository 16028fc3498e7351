//! Web search tool used by agent mode.
//!
//! [`SerperSearch`] implements [`WebSearch`]; failures are logged and turned
//! into an empty result list so a broken search never fails a chat request.

mod config;
mod errors;
mod serper;
mod types;

pub use config::SerperConfig;
pub use errors::SearchError;
pub use serper::SerperSearch;
pub use types::{SearchResult, WebSearch};
