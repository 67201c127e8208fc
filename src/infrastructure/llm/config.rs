//! LLM Configuration

use serde::{Deserialize, Serialize};

/// Settings for the fallback responder's LLM provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LLMConfig {
    /// API key; falls back to GROQ_API_KEY in the environment
    pub api_key: Option<String>,

    /// Model override
    pub model: Option<String>,

    /// Default settings
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Some("llama-3.3-70b-versatile".to_string()),
            temperature: 0.7,
            max_tokens: Some(1024),
            system_prompt: Some("You are reflex, a helpful AI assistant.".to_string()),
        }
    }
}

impl LLMConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.model = Some(model);
        }

        if let Ok(prompt) = std::env::var("LLM_SYSTEM_PROMPT") {
            config.system_prompt = Some(prompt);
        }

        if let Ok(temp) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                config.temperature = t;
            }
        }

        config
    }

    /// Overlay environment variables onto file-loaded settings
    pub fn with_env_overrides(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var("GROQ_API_KEY").ok();
        }
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or("llama-3.3-70b-versatile")
    }
}
