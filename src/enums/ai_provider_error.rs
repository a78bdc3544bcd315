use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AiProviderError {
    #[error("Groq API error: {0}")]
    ApiError(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("authentication error: {0}")]
    AuthenticationError(String),
}

impl AiProviderError {
    /// Authentication failures are terminal; retrying with the same key
    /// cannot succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::AuthenticationError(_))
    }
}
