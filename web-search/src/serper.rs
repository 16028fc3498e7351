//! Serper (Google Search API) client.
//!
//! - `POST {endpoint}` with `{ "q": query, "num": n }` and header `X-API-KEY`
//! - Maps `organic[]` to [`SearchResult`]s; absent fields become empty strings.

use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::SerperConfig,
    errors::SearchError,
    types::{SearchResult, WebSearch},
};

pub struct SerperSearch {
    client: reqwest::Client,
    cfg: SerperConfig,
}

impl SerperSearch {
    /// # Errors
    /// Invalid API key header value or HTTP client build failure.
    pub fn new(cfg: SerperConfig) -> Result<Self, SearchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&cfg.api_key)
                .map_err(|e| SearchError::Config(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        info!(endpoint = %cfg.endpoint, num = cfg.num_results, "SerperSearch initialized");
        Ok(Self { client, cfg })
    }

    /// Performs one search request.
    ///
    /// # Errors
    /// Transport, non-2xx status or undecodable body.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let started = Instant::now();
        let body = SerperRequest {
            q: query,
            num: self.cfg.num_results,
        };

        let resp = self
            .client
            .post(&self.cfg.endpoint)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::HttpStatus {
                status,
                snippet: text.chars().take(240).collect(),
            });
        }

        let out: SerperResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        let results = out.into_results();

        debug!(
            results = results.len(),
            latency_ms = started.elapsed().as_millis(),
            "serper search completed"
        );
        Ok(results)
    }
}

impl WebSearch for SerperSearch {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<SearchResult>> {
        Box::pin(async move {
            match self.try_search(query).await {
                Ok(results) => results,
                Err(e) => {
                    warn!(error = %e, "web search failed; continuing without results");
                    Vec::new()
                }
            }
        })
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Default, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl SerperResponse {
    fn into_results(self) -> Vec<SearchResult> {
        self.organic
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                snippet: r.snippet,
                link: r.link,
            })
            .collect()
    }
}
