//! Scenario path - the keys from the root to the current position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Ordered keys from the root of the tree to the orchestrator's position.
/// An empty path means no scenario has been chosen yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioPath(Vec<String>);

impl ScenarioPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path with a single root key.
    pub fn root(key: impl Into<String>) -> Self {
        Self(vec![key.into()])
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.0.push(key.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Segments joined with single spaces, used as a prompt when a leaf is
    /// reached.
    pub fn as_prompt(&self) -> String {
        self.0.join(" ")
    }
}

impl Deref for ScenarioPath {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for ScenarioPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for ScenarioPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}
