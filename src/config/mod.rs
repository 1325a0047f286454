//! Application configuration module
//!
//! Configuration is layered with the `config` crate, lowest precedence first:
//!
//! 1. Built-in defaults (serde defaults on each section)
//! 2. An optional TOML file (`solace.toml`, or the path given with `--config`)
//! 3. Environment variables prefixed `SOLACE`, with `__` separating nested keys
//!
//! A `.env` file is loaded into the environment first when present.
//!
//! # Example
//!
//! ```no_run
//! use solace::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod dialogue;
mod error;
mod storage;

pub use ai::AiConfig;
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::Path;

use crate::logging::LogFormat;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion service (OpenAI-compatible endpoint)
    #[serde(default)]
    pub ai: AiConfig,

    /// Dialogue behaviour and seed tree
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Data directory and encryption key
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Environment Variable Format
    ///
    /// - `SOLACE__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `SOLACE__DIALOGUE__RESPONSE_MODE=structured` -> `dialogue.response_mode`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicit file is missing or values cannot
    /// be parsed into the expected types.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("solace").required(false),
        };

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(config::Environment::with_prefix("SOLACE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.dialogue.validate()?;
        Ok(())
    }
}
