//! ResponseProcessor - turns raw completions into what the user sees.

use super::prompts::{minor_disclaimer, Jurisdiction};
use crate::domain::user::Demographics;

/// Post-processing applied to every completion shown to the user.
#[derive(Debug, Clone)]
pub struct ResponseProcessor {
    envelope_marker: String,
}

impl ResponseProcessor {
    pub fn new(envelope_marker: impl Into<String>) -> Self {
        Self {
            envelope_marker: envelope_marker.into(),
        }
    }

    /// Appends the age disclaimer (minors only) and then the jurisdiction
    /// resource line (known countries only).
    ///
    /// Call once per raw completion; applying it twice duplicates the blocks.
    pub fn augment(&self, raw: &str, user: &Demographics) -> String {
        let mut out = raw.to_string();
        if user.is_minor() {
            out.push_str(minor_disclaimer());
        }
        if let Some(jurisdiction) = Jurisdiction::from_country(&user.country) {
            out.push_str(jurisdiction.resource_line());
        }
        out
    }

    /// Returns everything from the first envelope marker to the end, trimmed.
    /// Without a marker the whole completion is returned, trimmed.
    pub fn extract_envelope<'a>(&self, raw: &'a str) -> &'a str {
        match raw.find(self.envelope_marker.as_str()) {
            Some(start) if !self.envelope_marker.is_empty() => raw[start..].trim(),
            _ => raw.trim(),
        }
    }
}

impl Default for ResponseProcessor {
    fn default() -> Self {
        Self::new("Sentiment:")
    }
}
