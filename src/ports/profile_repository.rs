//! ProfileRepository port for user profile persistence.
//!
//! Sensitive profile fields are encrypted inside the adapter; callers only
//! ever see plaintext `UserProfile` values.

use async_trait::async_trait;

use crate::domain::{
    foundation::UserId,
    user::{Feedback, Interaction, RatingRecord, UserProfile},
};

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A profile with this id already exists.
    #[error("a profile for '{0}' already exists")]
    DuplicateId(UserId),

    /// No profile with this id.
    #[error("no profile for '{0}'")]
    NotFound(UserId),

    /// A stored field could not be decrypted. The profile cannot be trusted.
    #[error("failed to decrypt field '{field}'")]
    Decryption { field: String },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn decryption(field: impl Into<String>) -> Self {
        Self::Decryption {
            field: field.into(),
        }
    }

    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Repository for user profiles, interactions, feedback and ratings.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by id. Fails with `Decryption` if any field is unreadable.
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Insert a new profile. Fails with `DuplicateId` if the id exists.
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// Append one interaction to the profile's history.
    async fn append_interaction(
        &self,
        id: &UserId,
        interaction: Interaction,
    ) -> Result<(), StoreError>;

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError>;

    async fn insert_rating(&self, rating: &RatingRecord) -> Result<(), StoreError>;

    /// The last `limit` interactions, oldest first.
    async fn recent_interactions(
        &self,
        id: &UserId,
        limit: usize,
    ) -> Result<Vec<Interaction>, StoreError> {
        let profile = self
            .find_profile(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(profile.recent_interactions(limit).to_vec())
    }
}
