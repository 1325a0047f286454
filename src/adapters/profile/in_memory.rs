//! In-memory profile repository.
//!
//! Profiles go through the same codec as the file repository, so encryption
//! and decryption failures behave identically.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::codec::{ProfileCodec, StoredProfile};
use crate::adapters::crypto::FieldCipher;
use crate::domain::foundation::UserId;
use crate::domain::user::{Feedback, Interaction, RatingRecord, UserProfile};
use crate::ports::{ProfileRepository, StoreError};

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<UserId, StoredProfile>,
    feedback: Vec<Feedback>,
    ratings: Vec<RatingRecord>,
}

/// Profile repository held in process memory.
#[derive(Debug)]
pub struct InMemoryProfileRepository {
    codec: ProfileCodec,
    tables: RwLock<Tables>,
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new(ProfileCodec::new(FieldCipher::ephemeral()))
    }
}

impl InMemoryProfileRepository {
    pub fn new(codec: ProfileCodec) -> Self {
        Self {
            codec,
            tables: RwLock::new(Tables::default()),
        }
    }

    pub async fn feedback(&self) -> Vec<Feedback> {
        self.tables.read().await.feedback.clone()
    }

    pub async fn ratings(&self) -> Vec<RatingRecord> {
        self.tables.read().await.ratings.clone()
    }

    /// The stored (encrypted) form of a profile.
    pub async fn stored(&self, id: &UserId) -> Option<StoredProfile> {
        self.tables.read().await.profiles.get(id).cloned()
    }

    /// Replaces the stored form of a profile as-is.
    pub async fn put_stored(&self, id: UserId, stored: StoredProfile) {
        self.tables.write().await.profiles.insert(id, stored);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let stored = self.tables.read().await.profiles.get(id).cloned();
        stored.map(|s| self.codec.decode(s)).transpose()
    }

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let stored = self.codec.encode(profile)?;
        let mut tables = self.tables.write().await;
        if tables.profiles.contains_key(profile.id()) {
            return Err(StoreError::DuplicateId(profile.id().clone()));
        }
        tables.profiles.insert(profile.id().clone(), stored);
        Ok(())
    }

    async fn append_interaction(
        &self,
        id: &UserId,
        interaction: Interaction,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        stored.interactions.push(interaction);
        Ok(())
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.tables.write().await.feedback.push(feedback.clone());
        Ok(())
    }

    async fn insert_rating(&self, rating: &RatingRecord) -> Result<(), StoreError> {
        self.tables.write().await.ratings.push(rating.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::profile::fixtures::profile;

    #[tokio::test]
    async fn insert_find_and_append() {
        let repo = InMemoryProfileRepository::default();
        let ana = profile(30, "usa");

        repo.insert_profile(&ana).await.unwrap();
        repo.append_interaction(ana.id(), Interaction::new("hi", "hello"))
            .await
            .unwrap();

        let found = repo.find_profile(ana.id()).await.unwrap().unwrap();
        assert_eq!(found.interactions().len(), 1);
        assert_eq!(found.demographics(), ana.demographics());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = InMemoryProfileRepository::default();
        let ana = profile(30, "usa");
        repo.insert_profile(&ana).await.unwrap();

        assert!(matches!(
            repo.insert_profile(&ana).await,
            Err(StoreError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn corrupted_record_fails_loudly() {
        let repo = InMemoryProfileRepository::default();
        let ana = profile(30, "usa");
        repo.insert_profile(&ana).await.unwrap();

        let mut stored = repo.stored(ana.id()).await.unwrap();
        stored.name = "plain text".into();
        repo.put_stored(ana.id().clone(), stored).await;

        assert!(matches!(
            repo.find_profile(ana.id()).await,
            Err(StoreError::Decryption { field }) if field == "name"
        ));
    }
}
