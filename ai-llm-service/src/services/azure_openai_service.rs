//! Azure OpenAI chat completions client.
//!
//! Minimal, non-streaming client around the Azure OpenAI REST API:
//! - POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::AzureOpenAi`
//! - `cfg.api_key` and `cfg.api_version` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    chat_model::{ChatCompletion, TokenUsage},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for one Azure OpenAI chat deployment.
///
/// Keeps a preconfigured `reqwest::Client` (`api-key` header, optional timeout).
#[derive(Debug)]
pub struct AzureOpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl AzureOpenAiService {
    /// Creates a new [`AzureOpenAiService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Azure OpenAI
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid or `api_version` is missing
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::AzureOpenAi {
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
        let api_version = cfg.api_version.as_deref().ok_or_else(|| {
            provider_err(ProviderErrorKind::InvalidEndpoint(
                "missing api-version".into(),
            ))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "api-key",
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                provider_err(ProviderErrorKind::Decode(format!(
                    "invalid API key header: {e}"
                )))
            })?,
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

        let base = endpoint.trim_end_matches('/');
        let url_chat = format!(
            "{base}/openai/deployments/{}/chat/completions?api-version={api_version}",
            cfg.model
        );

        info!(
            provider = ?cfg.provider,
            deployment = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            "AzureOpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion with a single user message.
    ///
    /// Mapped options from config: `temperature`, `top_p`, `max_tokens`.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - `Decode` if the JSON cannot be parsed
    /// - `EmptyChoices` if no choice carries content
    #[instrument(skip_all, fields(deployment = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<ChatCompletion, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST chat/completions");

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Azure OpenAI chat/completions returned non-success status"
            );

            return Err(provider_err(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })));
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode chat/completions response"
            );
            provider_err(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            )))
        })?;

        let usage = out.usage.map(|u| TokenUsage {
            completion_tokens: u.completion_tokens,
            prompt_tokens: u.prompt_tokens,
            total_tokens: u.total_tokens,
        });

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| provider_err(ProviderErrorKind::EmptyChoices))?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            answer_len = content.len(),
            "chat completion completed"
        );

        Ok(ChatCompletion { content, usage })
    }
}

fn provider_err(kind: ProviderErrorKind) -> AiLlmError {
    ProviderError::new(LlmProvider::AzureOpenAi, kind).into()
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Request body for `chat/completions` (non-streaming). Azure takes the
/// model from the deployment path, so it is not part of the body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<UsageOut>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageOut {
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
