//! Default model configs resolved from environment variables.
//!
//! Two roles are supported:
//!
//! - **Chat**      → Azure OpenAI deployment used for answers, summaries and extraction
//! - **Embedding** → Cohere embedding model used for the FAQ index and queries
//!
//! # Environment variables
//!
//! Chat:
//! - `AZURE_OPENAI_API_KEY`                  (required)
//! - `AZURE_OPENAI_API_INSTANCE_NAME`        (required) → `https://{name}.openai.azure.com`
//! - `AZURE_OPENAI_API_CHAT_DEPLOYMENT_NAME` (required)
//! - `AZURE_OPENAI_API_VERSION`              (required)
//! - `LLM_TEMPERATURE` (default `0.3`), `LLM_MAX_TOKENS` (optional)
//!
//! Embedding:
//! - `COHERE_API_KEY`     (required)
//! - `COHERE_EMBED_MODEL` (default `embed-english-v3.0`)
//! - `COHERE_URL`         (default `https://api.cohere.com`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        EnvLookup, Result, env_opt_u32, env_or, env_parse_or, must_env, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Names the chat and embedding roles cannot start without.
pub const REQUIRED_MODEL_VARS: [&str; 5] = [
    "AZURE_OPENAI_API_KEY",
    "AZURE_OPENAI_API_INSTANCE_NAME",
    "AZURE_OPENAI_API_CHAT_DEPLOYMENT_NAME",
    "AZURE_OPENAI_API_VERSION",
    "COHERE_API_KEY",
];

const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_EMBED_MODEL: &str = "embed-english-v3.0";
const DEFAULT_COHERE_URL: &str = "https://api.cohere.com";

/// Constructs the config for the Azure OpenAI **chat** deployment.
///
/// # Defaults
/// - `temperature = 0.3`
/// - no request timeout unless `LLM_TIMEOUT_SECS` is set
///
/// # Errors
/// Missing variables, unparsable numbers, or a temperature outside `0.0..=2.0`.
pub fn config_azure_chat(env: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let api_key = must_env(env, "AZURE_OPENAI_API_KEY")?;
    let instance = must_env(env, "AZURE_OPENAI_API_INSTANCE_NAME")?;
    let deployment = must_env(env, "AZURE_OPENAI_API_CHAT_DEPLOYMENT_NAME")?;
    let api_version = must_env(env, "AZURE_OPENAI_API_VERSION")?;

    let temperature = env_parse_or(env, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE, "expected f32")?;
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;
    let max_tokens = env_opt_u32(env, "LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u32(env, "LLM_TIMEOUT_SECS")?.map(u64::from);

    Ok(LlmModelConfig {
        provider: LlmProvider::AzureOpenAi,
        model: deployment,
        endpoint: format!("https://{}.openai.azure.com", instance.trim()),
        api_key: Some(api_key),
        api_version: Some(api_version),
        max_tokens,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs,
    })
}

/// Constructs the config for the Cohere **embedding** model.
///
/// # Errors
/// Missing `COHERE_API_KEY` or a `COHERE_URL` without http/https scheme.
pub fn config_cohere_embedding(env: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let api_key = must_env(env, "COHERE_API_KEY")?;
    let model = env_or(env, "COHERE_EMBED_MODEL", DEFAULT_EMBED_MODEL);
    let endpoint = env_or(env, "COHERE_URL", DEFAULT_COHERE_URL);
    validate_http_endpoint("COHERE_URL", &endpoint)?;
    let timeout_secs = env_opt_u32(env, "COHERE_TIMEOUT_SECS")?.map(u64::from);

    Ok(LlmModelConfig {
        provider: LlmProvider::Cohere,
        model,
        endpoint,
        api_key: Some(api_key),
        api_version: None,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs,
    })
}
