//! Local token estimates used when the provider reports no usage.

use ai_llm_service::TokenUsage;

/// Rough token count: one token per four chars, rounded up.
pub fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
}

/// Usage for a chat answer: the prompt side counts the question and the
/// retrieved context, the completion side the answer.
pub fn estimate_chat_usage(question: &str, context: &str, answer: &str) -> TokenUsage {
    let prompt = estimate_tokens(question).saturating_add(estimate_tokens(context));
    TokenUsage::new(estimate_tokens(answer), prompt)
}

/// Usage for a fixed-size tool reply.
pub fn fixed_completion_usage(question: &str, completion_tokens: u32) -> TokenUsage {
    TokenUsage::new(completion_tokens, estimate_tokens(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_per_char() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("éééé"), 1);
    }

    #[test]
    fn total_is_sum_of_parts() {
        let u = estimate_chat_usage("What ships?", "We ship worldwide.", "Everything.");
        assert_eq!(u.prompt_tokens, 3 + 5);
        assert_eq!(u.completion_tokens, 3);
        assert_eq!(u.total_tokens, u.completion_tokens + u.prompt_tokens);
    }
}
