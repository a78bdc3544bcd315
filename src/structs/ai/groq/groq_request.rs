use serde::Serialize;

use crate::structs::ai::groq::groq_message::GroqMessage;

/// Body for Groq's OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub stream: bool,
}
