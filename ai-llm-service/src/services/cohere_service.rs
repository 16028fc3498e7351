//! Cohere embeddings client.
//!
//! - `POST {endpoint}/v1/embed` for batch embeddings for documents or queries
//!
//! Cohere v3 models need to know whether a text is a stored document or a
//! search query; see [`EmbedInputType`].

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Role of the embedded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedInputType {
    /// Corpus chunks stored in the index.
    SearchDocument,
    /// User questions matched against the index.
    SearchQuery,
}

/// Thin client for the Cohere embed endpoint.
pub struct CohereService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_embed: String,
}

impl CohereService {
    /// Creates a new [`CohereService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Cohere
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Cohere {
            return Err(provider_err(ProviderErrorKind::InvalidProvider));
        }
        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| provider_err(ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(provider_err(ProviderErrorKind::InvalidEndpoint(
                cfg.endpoint.clone(),
            )));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                provider_err(ProviderErrorKind::Decode(format!(
                    "invalid API key header: {e}"
                )))
            })?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let url_embed = format!("{}/v1/embed", endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            cfg,
            url_embed,
        })
    }

    /// Embeds a batch of texts. Output order matches input order.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - `Decode` if the response cannot be parsed or the count does not match
    #[instrument(skip_all, fields(model = %self.cfg.model, batch = texts.len(), input_type = ?input_type))]
    pub async fn embed(
        &self,
        texts: &[String],
        input_type: EmbedInputType,
    ) -> Result<Vec<Vec<f32>>, AiLlmError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let body = EmbedRequest {
            model: &self.cfg.model,
            texts,
            input_type,
            truncate: "END",
        };

        debug!("POST {}", self.url_embed);
        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(provider_err(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })));
        }

        let out: EmbedResponse = resp.json().await.map_err(|e| {
            provider_err(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `{{ embeddings: number[][] }}`"
            )))
        })?;

        if out.embeddings.len() != texts.len() {
            return Err(provider_err(ProviderErrorKind::Decode(format!(
                "got {} embeddings for {} texts",
                out.embeddings.len(),
                texts.len()
            ))));
        }

        Ok(out.embeddings)
    }
}

fn provider_err(kind: ProviderErrorKind) -> AiLlmError {
    ProviderError::new(LlmProvider::Cohere, kind).into()
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: EmbedInputType,
    truncate: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}
