//! UserProfile aggregate and its demographic attributes.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Age below which the minor disclaimer applies.
pub const ADULT_AGE: u32 = 18;

/// Upper bound accepted for an entered age.
pub const MAX_AGE: u32 = 120;

/// Personal attributes collected at registration.
///
/// Every field here is sensitive and is encrypted at the persistence
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub country: String,
    pub occupation: String,
}

impl Demographics {
    /// Builds demographics, trimming text fields and checking the age range.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        sex: impl Into<String>,
        country: impl Into<String>,
        occupation: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if age == 0 || age > MAX_AGE {
            return Err(ValidationError::out_of_range(
                "age",
                1,
                MAX_AGE as i64,
                age as i64,
            ));
        }
        Ok(Self {
            name,
            age,
            sex: sex.into().trim().to_string(),
            country: country.into().trim().to_string(),
            occupation: occupation.into().trim().to_string(),
        })
    }

    pub fn is_minor(&self) -> bool {
        self.age < ADULT_AGE
    }
}

/// One completed turn: what the user said and what they were shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_input: String,
    pub bot_response: String,
    pub timestamp: Timestamp,
}

impl Interaction {
    pub fn new(user_input: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            bot_response: bot_response.into(),
            timestamp: Timestamp::now(),
        }
    }
}

/// A registered user.
///
/// # Invariants
///
/// - `id` is the normalized e-mail address and never changes
/// - `interactions` is append-only and ordered oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: UserId,
    demographics: Demographics,
    credential_hash: String,
    interactions: Vec<Interaction>,
}

impl UserProfile {
    /// Creates a profile with no interaction history.
    pub fn new(id: UserId, demographics: Demographics, credential_hash: impl Into<String>) -> Self {
        Self {
            id,
            demographics,
            credential_hash: credential_hash.into(),
            interactions: Vec::new(),
        }
    }

    /// Rebuilds a profile from storage.
    pub fn reconstitute(
        id: UserId,
        demographics: Demographics,
        credential_hash: String,
        interactions: Vec<Interaction>,
    ) -> Self {
        Self {
            id,
            demographics,
            credential_hash,
            interactions,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn name(&self) -> &str {
        &self.demographics.name
    }

    pub fn age(&self) -> u32 {
        self.demographics.age
    }

    pub fn country(&self) -> &str {
        &self.demographics.country
    }

    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn record_interaction(&mut self, interaction: Interaction) {
        self.interactions.push(interaction);
    }

    /// The last `limit` interactions, oldest first.
    pub fn recent_interactions(&self, limit: usize) -> &[Interaction] {
        let start = self.interactions.len().saturating_sub(limit);
        &self.interactions[start..]
    }
}
