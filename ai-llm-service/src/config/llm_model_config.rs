use crate::config::llm_provider::LlmProvider;

/// Configuration for one hosted model.
///
/// The same struct describes the chat deployment and the embedding model; the
/// fields a provider does not use stay `None`.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Cohere,
///     model: "embed-english-v3.0".to_string(),
///     endpoint: "https://api.cohere.com".to_string(),
///     api_key: Some("co-...".to_string()),
///     api_version: None,
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: None,
/// };
/// assert_eq!(cfg.provider, LlmProvider::Cohere);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The hosted provider.
    pub provider: LlmProvider,

    /// Model identifier. For Azure this is the deployment name.
    pub model: String,

    /// Base URL, e.g. `https://my-instance.openai.azure.com`.
    pub endpoint: String,

    /// API key sent with every request.
    pub api_key: Option<String>,

    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout (in seconds). `None` leaves the client without one.
    pub timeout_secs: Option<u64>,
}
