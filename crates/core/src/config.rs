use std::env;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_RECOMMEND_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_FAQ_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_CHAT_MODEL: &str = "gemini-pro";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub llm: LlmConfig,
}

/// Generative backend settings. The API key is optional: without one the
/// backend reports failure and every request takes the deterministic
/// fallback path.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub recommend_model: String,
    pub faq_model: String,
    pub chat_model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            recommend_model: DEFAULT_RECOMMEND_MODEL.to_string(),
            faq_model: DEFAULT_FAQ_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { llm: LlmConfig::default() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
}

impl AssistantConfig {
    /// Loads configuration from `SMARTSHOP_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(key) = env::var("SMARTSHOP_GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                config.llm.api_key = Some(SecretString::from(key));
            }
        }
        if let Ok(model) = env::var("SMARTSHOP_RECOMMEND_MODEL") {
            config.llm.recommend_model = model;
        }
        if let Ok(model) = env::var("SMARTSHOP_FAQ_MODEL") {
            config.llm.faq_model = model;
        }
        if let Ok(model) = env::var("SMARTSHOP_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(raw) = env::var("SMARTSHOP_LLM_TIMEOUT_SECS") {
            config.llm.timeout_secs = raw.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "SMARTSHOP_LLM_TIMEOUT_SECS".to_string(),
                value: raw,
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantConfig, DEFAULT_TIMEOUT_SECS};

    #[test]
    fn defaults_cover_all_models() {
        let config = AssistantConfig::default();
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.recommend_model, "gemini-2.0-flash");
        assert_eq!(config.llm.chat_model, "gemini-pro");
        assert_eq!(config.llm.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
