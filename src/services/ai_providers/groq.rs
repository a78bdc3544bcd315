use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    MAX_RETRIES, RETRY_DELAY_SECS,
};
use crate::enums::ai_provider_error::AiProviderError;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::structs::ai::groq::groq_message::GroqMessage;
use crate::structs::ai::groq::groq_request::GroqRequest;
use crate::structs::ai::groq::groq_response::GroqResponse;
use crate::traits::ai_provider::AiProvider;

/// Groq chat-completions client. Groq serves the OpenAI wire protocol, so
/// this is a bearer-token POST to `{base_url}/chat/completions`.
#[derive(Clone)]
pub struct GroqProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    rate_limiter: Arc<ApiRateLimiter>,
}

impl GroqProvider {
    pub fn new(api_key: String, rate_limiter: Arc<ApiRateLimiter>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            rate_limiter,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32, top_p: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self.top_p = top_p;
        self
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> GroqRequest {
        let mut messages = Vec::new();

        if !system_prompt.is_empty() {
            messages.push(GroqMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            });
        }
        messages.push(GroqMessage {
            role: "user".to_string(),
            content: user_prompt.to_string(),
        });

        GroqRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            stream: false,
        }
    }

    async fn request_once(&self, request_body: &GroqRequest) -> Result<String, AiProviderError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 | 403 => AiProviderError::AuthenticationError(error_text),
                429 => AiProviderError::ApiError(format!("rate limit exceeded: {}", error_text)),
                _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: GroqResponse = response
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        if let Some(usage) = &body.usage {
            log::debug!(
                "Groq usage: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        body.choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AiProviderError::SerializationError("no choices in response".to_string())
            })
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiProviderError> {
        let request_body = self.build_request(system_prompt, user_prompt);

        let mut attempt = 1;
        loop {
            match self.request_once(&request_body).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                    log::warn!(
                        "Retrying Groq request ({}/{}) after error: {}",
                        attempt,
                        MAX_RETRIES,
                        e
                    );
                    tokio::time::sleep(Duration::from_secs(RETRY_DELAY_SECS)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
