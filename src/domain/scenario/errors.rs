//! Error types for the scenario tree.

/// Scenario tree errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// A path segment does not name a child of the node before it.
    #[error("Scenario path not found: {path}")]
    PathNotFound { path: String },

    /// A node or subtree violates the structural contract.
    #[error("Malformed scenario: {reason}")]
    MalformedScenario { reason: String },
}

impl ScenarioError {
    /// Creates a path-not-found error from the segments that were requested.
    pub fn path_not_found<S: AsRef<str>>(segments: &[S]) -> Self {
        let path = segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" > ");
        Self::PathNotFound { path }
    }

    /// Creates a malformed-scenario error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedScenario {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_not_found_joins_segments() {
        let err = ScenarioError::path_not_found(&["a", "b"]);
        assert_eq!(err.to_string(), "Scenario path not found: a > b");
    }

    #[test]
    fn malformed_displays_reason() {
        let err = ScenarioError::malformed("node has neither key nor label");
        assert_eq!(
            err.to_string(),
            "Malformed scenario: node has neither key nor label"
        );
    }
}
