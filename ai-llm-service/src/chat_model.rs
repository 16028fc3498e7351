//! Provider-agnostic chat seam used by downstream crates.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error_handler::AiLlmError;

/// Token accounting for one model exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub completion_tokens: u32,
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Builds a usage record whose total is the sum of its parts.
    pub fn new(completion_tokens: u32, prompt_tokens: u32) -> Self {
        Self {
            completion_tokens,
            prompt_tokens,
            total_tokens: completion_tokens.saturating_add(prompt_tokens),
        }
    }
}

/// Text produced by a chat model plus the usage the provider reported, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

/// Single-turn chat completion.
///
/// Implemented by [`LlmServiceProfiles`](crate::service_profiles::LlmServiceProfiles)
/// for production and by in-memory fakes in tests.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>>;
}
