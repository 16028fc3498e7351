//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested types (e.g., [`ConfigError`],
//! [`ProviderError`]). Small helpers for reading/validating environment variables are
//! provided and return the unified [`Result<T>`] alias.
//!
//! Env helpers take an [`EnvLookup`] so callers can read the process environment
//! ([`process_env`]) or an in-memory map in tests.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use std::{fmt, str::FromStr};

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream provider rejected the call or answered with something unusable.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are missing or empty.
    #[error(
        "[AI LLM Service] missing required environment variables: {}. Please check your .env file and ensure all variables are set.",
        .0.join(", ")
    )]
    MissingVars(Vec<&'static str>),

    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`, `PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `COHERE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Details of a non-successful HTTP exchange with an upstream provider.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status returned by the provider.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short, trimmed snippet of the response body.
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// What went wrong while talking to a provider.
#[non_exhaustive]
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// The config handed to a client names a different provider.
    InvalidProvider,
    /// The provider requires an API key and none was configured.
    MissingApiKey,
    /// Endpoint is empty or not http/https.
    InvalidEndpoint(String),
    /// Upstream returned a non-2xx status.
    HttpStatus(HttpError),
    /// Response body could not be decoded as expected.
    Decode(String),
    /// Chat completion returned no usable choice.
    EmptyChoices,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProvider => f.write_str("config belongs to another provider"),
            Self::MissingApiKey => f.write_str("missing API key"),
            Self::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            Self::HttpStatus(e) => write!(f, "{e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::EmptyChoices => f.write_str("response contained no choices"),
        }
    }
}

/// Provider-tagged error.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/// Trims a response body into a single-line snippet suitable for logs and errors.
pub fn make_snippet(text: &str) -> String {
    const MAX: usize = 240;
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let mut s: String = flat.chars().take(MAX).collect();
        s.push('…');
        s
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Source of configuration values, keyed by variable name.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads a variable from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(env: EnvLookup<'_>, name: &str) -> Option<String> {
    env(name).filter(|v| !v.trim().is_empty())
}

/// Checks that every variable in `names` is present and non-empty.
///
/// # Errors
/// Returns [`ConfigError::MissingVars`] listing **all** missing names at once.
pub fn ensure_env_vars(env: EnvLookup<'_>, names: &[&'static str]) -> Result<()> {
    let missing: Vec<&'static str> = names
        .iter()
        .copied()
        .filter(|n| non_empty(env, n).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingVars(missing).into())
    }
}

/// Fetches a required, non-empty variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(env: EnvLookup<'_>, name: &'static str) -> Result<String> {
    non_empty(env, name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Returns the variable's value or `default` when unset/empty.
pub fn env_or(env: EnvLookup<'_>, name: &str, default: &str) -> String {
    non_empty(env, name).unwrap_or_else(|| default.to_string())
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if set but not a valid `u32`.
pub fn env_opt_u32(env: EnvLookup<'_>, name: &'static str) -> Result<Option<u32>> {
    match non_empty(env, name) {
        Some(v) => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses a number with a fallback default when unset/empty.
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] carrying `reason` on parse failure.
pub fn env_parse_or<T: FromStr>(
    env: EnvLookup<'_>,
    name: &'static str,
    default: T,
    reason: &'static str,
) -> Result<T> {
    match non_empty(env, name) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        None => Ok(default),
    }
}

/// Reads a boolean flag (`1/true/yes/on`, case-insensitive). Unset means `false`.
pub fn env_flag(env: EnvLookup<'_>, name: &str) -> bool {
    non_empty(env, name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Reads a comma-separated list, dropping empty entries. Unset means `default`.
pub fn env_list(env: EnvLookup<'_>, name: &str, default: &[&str]) -> Vec<String> {
    match non_empty(env, name) {
        Some(v) => v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the scheme is missing.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn reports_every_missing_variable_at_once() {
        let env = lookup(&[("A", "x"), ("C", "   ")]);
        let err = ensure_env_vars(&env, &["A", "B", "C", "D"]).unwrap_err();
        match err {
            AiLlmError::Config(ConfigError::MissingVars(names)) => {
                assert_eq!(names, vec!["B", "C", "D"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let msg = ensure_env_vars(&env, &["B", "D"]).unwrap_err().to_string();
        assert!(msg.contains("B, D"), "{msg}");
    }

    #[test]
    fn parses_numbers_lists_and_flags() {
        let env = lookup(&[
            ("N", "42"),
            ("BAD", "forty"),
            ("LIST", " a, ,b ,c"),
            ("ON", "TRUE"),
        ]);
        assert_eq!(env_opt_u32(&env, "N").unwrap(), Some(42));
        assert_eq!(env_opt_u32(&env, "MISSING").unwrap(), None);
        assert!(env_opt_u32(&env, "BAD").is_err());
        assert_eq!(env_parse_or::<usize>(&env, "MISSING", 7, "usize").unwrap(), 7);
        assert_eq!(env_list(&env, "LIST", &[]), vec!["a", "b", "c"]);
        assert_eq!(env_list(&env, "NONE", &["x"]), vec!["x"]);
        assert!(env_flag(&env, "ON"));
        assert!(!env_flag(&env, "NONE"));
    }

    #[test]
    fn snippet_is_flattened_and_bounded() {
        let body = format!("line one\n  line two {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("line one line two"));
        assert!(s.chars().count() <= 241);
    }

    #[test]
    fn endpoint_and_range_validation() {
        assert!(validate_http_endpoint("U", "https://api.cohere.com").is_ok());
        assert!(validate_http_endpoint("U", "api.cohere.com").is_err());
        assert!(validate_range_f32("temperature", 0.3, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("temperature", f32::NAN, 0.0, 2.0).is_err());
    }
}
