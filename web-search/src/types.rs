use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Web search tool.
///
/// `search` is infallible from the caller's point of view: provider and
/// transport failures are logged by the implementation and yield an empty list.
pub trait WebSearch: Send + Sync {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<SearchResult>>;
}
