use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GroqResponse {
    #[serde(default)]
    pub choices: Vec<GroqChoice>,
    #[serde(default)]
    pub usage: Option<GroqUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqChoice {
    pub message: GroqResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
