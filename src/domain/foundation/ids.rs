//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Identifies a user. The value is the user's e-mail address, trimmed and
/// lowercased, so that `Jane@Example.com ` and `jane@example.com` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId from an e-mail address, normalizing it first.
    pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = email.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        };
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "expected exactly one @ with a local part",
            ));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "domain must contain a dot",
            ));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        Ok(Self(normalized))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a stored feedback or rating record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random RecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_normalizes_case_and_whitespace() {
        let id = UserId::new("  Jane.Doe@Example.COM ").unwrap();
        assert_eq!(id.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn user_id_rejects_empty() {
        assert_eq!(
            UserId::new("   ").unwrap_err(),
            ValidationError::empty_field("email")
        );
    }

    #[test]
    fn user_id_rejects_missing_at() {
        assert!(UserId::new("jane.example.com").is_err());
    }

    #[test]
    fn user_id_rejects_double_at() {
        assert!(UserId::new("jane@doe@example.com").is_err());
    }

    #[test]
    fn user_id_rejects_dotless_domain() {
        assert!(UserId::new("jane@localhost").is_err());
    }

    #[test]
    fn user_id_rejects_inner_whitespace() {
        assert!(UserId::new("ja ne@example.com").is_err());
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("a@b.io").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a@b.io\"");
    }

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }
}
