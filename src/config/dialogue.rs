//! Dialogue behaviour configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::ai::AiConfig;
use super::error::ValidationError;
use crate::domain::dialogue::{DialogueSettings, ResponseMode};

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    #[serde(default = "default_persona")]
    pub persona_name: String,

    #[serde(default)]
    pub response_mode: ResponseMode,

    #[serde(default = "default_true")]
    pub expansion_enabled: bool,

    /// Session length (in messages) above which expansion runs
    #[serde(default = "default_threshold")]
    pub expansion_threshold: usize,

    /// Screen free-form input for topic relevance
    #[serde(default = "default_true")]
    pub relevance_check: bool,

    #[serde(default = "default_scratch_marker")]
    pub scratch_marker: String,

    #[serde(default = "default_envelope_marker")]
    pub envelope_marker: String,

    /// Optional JSON seed file with a top-level `scenarios` object
    pub scenarios_path: Option<PathBuf>,
}

impl DialogueConfig {
    pub fn to_settings(&self, ai: &AiConfig) -> DialogueSettings {
        DialogueSettings {
            persona_name: self.persona_name.clone(),
            response_mode: self.response_mode,
            expansion_enabled: self.expansion_enabled,
            expansion_threshold: self.expansion_threshold,
            scratch_marker: self.scratch_marker.clone(),
            envelope_marker: self.envelope_marker.clone(),
            max_tokens: ai.max_tokens,
            temperature: ai.temperature,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.persona_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("dialogue.persona_name"));
        }
        if self.expansion_threshold == 0 {
            return Err(ValidationError::InvalidExpansionThreshold);
        }
        if self.scratch_marker.trim().is_empty() {
            return Err(ValidationError::EmptyMarker("scratch_marker"));
        }
        if self.envelope_marker.trim().is_empty() {
            return Err(ValidationError::EmptyMarker("envelope_marker"));
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            persona_name: default_persona(),
            response_mode: ResponseMode::default(),
            expansion_enabled: true,
            expansion_threshold: default_threshold(),
            relevance_check: true,
            scratch_marker: default_scratch_marker(),
            envelope_marker: default_envelope_marker(),
            scenarios_path: None,
        }
    }
}

fn default_persona() -> String {
    "Solace".to_string()
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> usize {
    3
}

fn default_scratch_marker() -> String {
    "Thought Process:".to_string()
}

fn default_envelope_marker() -> String {
    "Sentiment:".to_string()
}
