use ai_llm_service::error_handler::{
    AiLlmError, EnvLookup, env_opt_u32, env_or, env_parse_or, must_env, validate_http_endpoint,
};

/// Serper client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SerperConfig {
    pub api_key: String,
    /// Full search URL, e.g. `https://google.serper.dev/search`.
    pub endpoint: String,
    /// Organic results requested per query.
    pub num_results: u32,
    /// Request timeout; `None` keeps the HTTP client default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl SerperConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://google.serper.dev/search";
    pub const API_KEY_VAR: &'static str = "SERPER_API_KEY";

    /// Reads `SERPER_API_KEY` (required), `SERPER_URL`, `SERPER_NUM_RESULTS`
    /// and `SERPER_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Missing key, bad numbers or an endpoint without http/https scheme.
    pub fn from_env(env: EnvLookup<'_>) -> Result<Self, AiLlmError> {
        let endpoint = env_or(env, "SERPER_URL", Self::DEFAULT_ENDPOINT);
        validate_http_endpoint("SERPER_URL", &endpoint)?;
        Ok(Self {
            api_key: must_env(env, Self::API_KEY_VAR)?,
            endpoint,
            num_results: env_parse_or(env, "SERPER_NUM_RESULTS", 5, "expected u32")?,
            timeout_secs: env_opt_u32(env, "SERPER_TIMEOUT_SECS")?.map(u64::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_five_results() {
        let env = |k: &str| (k == "SERPER_API_KEY").then(|| "sk".to_string());
        let cfg = SerperConfig::from_env(&env).unwrap();
        assert_eq!(cfg.num_results, 5);
        assert_eq!(cfg.endpoint, SerperConfig::DEFAULT_ENDPOINT);
        assert_eq!(cfg.api_key, "sk");
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn timeout_only_when_configured() {
        let env = |k: &str| match k {
            "SERPER_API_KEY" => Some("sk".to_string()),
            "SERPER_TIMEOUT_SECS" => Some("20".to_string()),
            _ => None,
        };
        assert_eq!(SerperConfig::from_env(&env).unwrap().timeout_secs, Some(20));
    }

    #[test]
    fn key_is_required() {
        assert!(SerperConfig::from_env(&|_: &str| -> Option<String> { None }).is_err());
    }
}
