use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_REQUESTS_PER_MINUTE,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};

/// Optional TOML configuration at `~/.predguard/config.toml`. Every field
/// falls back to a default; the file itself is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub requests_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        }
    }
}
