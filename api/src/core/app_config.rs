//! Process configuration, read once at startup.

use std::path::PathBuf;

use ai_llm_service::{
    config::{
        default_config::{REQUIRED_MODEL_VARS, config_azure_chat, config_cohere_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::{EnvLookup, ensure_env_vars, env_flag, env_or, env_parse_or},
};
use contextor::ContextorConfig;
use rag_store::RagConfig;
use web_search::SerperConfig;

use crate::error_handler::AppError;

/// HTTP listener and router settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the router fallback (the chat front-end).
    pub static_dir: PathBuf,
    /// Mounts `POST /api/cgpa`.
    pub enable_cgpa_endpoint: bool,
    /// Adds a `details` field to 5xx bodies (`APP_ENV=development`).
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            enable_cgpa_endpoint: false,
            expose_error_details: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Every config struct the service needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: LlmModelConfig,
    pub embedding: LlmModelConfig,
    pub rag: RagConfig,
    pub serper: SerperConfig,
    pub contextor: ContextorConfig,
}

impl AppConfig {
    /// Builds the full config from `env`.
    ///
    /// All missing required variables are reported in one error before any
    /// other value is parsed.
    ///
    /// # Errors
    /// Missing variables, unparsable numbers or invalid URLs.
    pub fn from_env(env: EnvLookup<'_>) -> Result<Self, AppError> {
        let mut required = REQUIRED_MODEL_VARS.to_vec();
        required.push(SerperConfig::API_KEY_VAR);
        ensure_env_vars(env, &required)?;

        let d = ServerConfig::default();
        let server = ServerConfig {
            host: env_or(env, "HOST", &d.host),
            port: env_parse_or(env, "PORT", d.port, "expected port number")?,
            static_dir: PathBuf::from(env_or(env, "STATIC_DIR", "public")),
            enable_cgpa_endpoint: env_flag(env, "ENABLE_CGPA_ENDPOINT"),
            expose_error_details: env_or(env, "APP_ENV", "production")
                .eq_ignore_ascii_case("development"),
        };

        Ok(Self {
            server,
            chat: config_azure_chat(env)?,
            embedding: config_cohere_embedding(env)?,
            rag: RagConfig::from_env(env)?,
            serper: SerperConfig::from_env(env)?,
            contextor: ContextorConfig::from_env(env),
        })
    }
}
