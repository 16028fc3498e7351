/// Represents the hosted provider (backend) behind an [`LlmModelConfig`].
///
/// Chat completions go to Azure OpenAI, embeddings to Cohere. Adding a provider
/// means extending this enum and the matching client in `services`.
///
/// [`LlmModelConfig`]: crate::config::llm_model_config::LlmModelConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Azure-hosted OpenAI chat deployment.
    AzureOpenAi,
    /// Cohere embedding API.
    Cohere,
}
