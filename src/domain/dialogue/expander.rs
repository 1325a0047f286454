//! ScenarioExpander - asks the completion service for new scenarios.
//!
//! Best effort only. Any failure (gateway error, no JSON object in the
//! reply, a reply that does not fit the scenario schema) is logged and
//! reported as `None`; the shared tree is never touched here.

use std::sync::Arc;

use super::prompts;
use crate::domain::conversation::{ConversationMessage, ConversationSession};
use crate::domain::scenario::{parse_scenario_map, ScenarioNode, ScenarioTree};
use crate::domain::user::Demographics;
use crate::ports::{CompletionGateway, CompletionPurpose, CompletionRequest};

/// Proposes scenario entries once a session is long enough.
pub struct ScenarioExpander {
    gateway: Arc<dyn CompletionGateway>,
    threshold: usize,
    scratch_marker: String,
}

impl ScenarioExpander {
    /// `threshold` is the message count a session must exceed before
    /// expansion is attempted.
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        threshold: usize,
        scratch_marker: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            threshold,
            scratch_marker: scratch_marker.into(),
        }
    }

    pub fn should_expand(&self, session: &ConversationSession) -> bool {
        session.len() > self.threshold
    }

    /// Returns validated top-level entries ready for `ScenarioTree::merge`,
    /// or `None` when expansion was skipped or failed.
    pub async fn maybe_expand(
        &self,
        session: &ConversationSession,
        user: &Demographics,
    ) -> Option<Vec<ScenarioNode>> {
        if !self.should_expand(session) {
            return None;
        }

        let history = session.format_history(&self.scratch_marker);
        let request = CompletionRequest::new(CompletionPurpose::Expansion)
            .with_message(ConversationMessage::user(prompts::expansion_prompt(user, &history)));

        let reply = match self.gateway.complete(request).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(error = %e, "Scenario expansion request failed");
                return None;
            }
        };

        let entries = parse_expansion(&reply);
        if let Some(entries) = &entries {
            tracing::debug!(count = entries.len(), "Scenario expansion proposed entries");
        }
        entries
    }
}

/// Parses a free-text reply into scenario entries.
pub fn parse_expansion(reply: &str) -> Option<Vec<ScenarioNode>> {
    let Some(json) = extract_json_object(reply) else {
        tracing::warn!("Scenario expansion reply contains no JSON object");
        return None;
    };

    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Scenario expansion reply is not valid JSON");
            return None;
        }
    };

    let entries = match parse_scenario_map(&value).and_then(ScenarioTree::new) {
        Ok(tree) => tree.into_roots(),
        Err(e) => {
            tracing::warn!(error = %e, "Scenario expansion reply does not fit the schema");
            return None;
        }
    };

    if entries.is_empty() {
        tracing::warn!("Scenario expansion reply proposed no scenarios");
        return None;
    }
    Some(entries)
}

/// The span from the first `{` to the last `}`, if both exist in that order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
