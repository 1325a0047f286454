//! Completion service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// OpenAI-compatible completion service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the completion service
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    pub max_tokens: Option<u32>,

    pub temperature: Option<f32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Gateway configuration, or `None` when no key is set.
    pub fn gateway_config(&self) -> Option<OpenAIConfig> {
        let key = self.api_key.as_ref()?.expose_secret();
        Some(
            OpenAIConfig::new(key.trim())
                .with_base_url(self.base_url.clone())
                .with_model(self.model.clone())
                .with_timeout(self.timeout()),
        )
    }

    /// Validate completion service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("SOLACE__AI__API_KEY"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: None,
            temperature: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            api_key: Some(Secret::new("tk-xxx".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.gateway_config().is_none());
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("SOLACE__AI__API_KEY"))
        );
        let blank = AiConfig {
            api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_gateway_config_carries_settings() {
        let config = AiConfig {
            model: "m".to_string(),
            timeout_secs: 5,
            ..with_key()
        };
        let gateway = config.gateway_config().unwrap();
        assert_eq!(gateway.model, "m");
        assert_eq!(gateway.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_key() {
        assert!(!format!("{:?}", with_key()).contains("tk-xxx"));
    }
}
