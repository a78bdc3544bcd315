use async_trait::async_trait;

use crate::enums::ai_provider_error::AiProviderError;

/// Seam between the analyzer and the hosted model. The production
/// implementation talks to Groq; tests substitute a scripted provider so
/// the pipeline runs without network.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// One non-streaming completion round-trip. Returns the raw completion
    /// text; callers are responsible for digging the JSON out of it.
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiProviderError>;
}
