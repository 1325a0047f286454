//! File-backed profile repository.
//!
//! Layout under the data directory:
//!
//! ```text
//! users/<sha256(id)>/profile.yaml
//! feedback/<record id>.yaml
//! ratings/<record id>.yaml
//! ```
//!
//! User directories are named by a hash of the id so e-mail addresses never
//! appear in paths. Writes go to a temporary file that is then renamed.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::codec::{ProfileCodec, StoredProfile};
use crate::domain::foundation::UserId;
use crate::domain::user::{Feedback, Interaction, RatingRecord, UserProfile};
use crate::ports::{ProfileRepository, StoreError};

/// Profile repository storing encrypted YAML documents on disk.
#[derive(Debug)]
pub struct FileProfileRepository {
    base_path: PathBuf,
    codec: ProfileCodec,
    // Serializes read-modify-write cycles on profile files.
    write_lock: Mutex<()>,
}

impl FileProfileRepository {
    pub fn new<P: AsRef<Path>>(base_path: P, codec: ProfileCodec) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            codec,
            write_lock: Mutex::new(()),
        }
    }

    fn profile_path(&self, id: &UserId) -> PathBuf {
        let digest = Sha256::digest(id.as_str().as_bytes());
        let dir: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        self.base_path.join("users").join(dir).join("profile.yaml")
    }

    fn record_path(&self, kind: &str, id: impl std::fmt::Display) -> PathBuf {
        self.base_path.join(kind).join(format!("{}.yaml", id))
    }

    async fn read_stored(&self, id: &UserId) -> Result<Option<StoredProfile>, StoreError> {
        let path = self.profile_path(id);
        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored = serde_yaml::from_str(&yaml)
            .map_err(|e| StoreError::serialization(format!("{}: {}", path.display(), e)))?;
        Ok(Some(stored))
    }

    async fn write_stored(&self, stored: &StoredProfile, id: &UserId) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(stored)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        write_atomic(&self.profile_path(id), &yaml).await
    }

    async fn write_record<T: serde::Serialize>(
        &self,
        path: PathBuf,
        record: &T,
    ) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(record)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        write_atomic(&path, &yaml).await
    }
}

async fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("yaml.tmp");
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl ProfileRepository for FileProfileRepository {
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        match self.read_stored(id).await? {
            Some(stored) => Ok(Some(self.codec.decode(stored)?)),
            None => Ok(None),
        }
    }

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        if fs::try_exists(self.profile_path(profile.id())).await? {
            return Err(StoreError::DuplicateId(profile.id().clone()));
        }
        let stored = self.codec.encode(profile)?;
        self.write_stored(&stored, profile.id()).await?;
        tracing::info!(user = %profile.id(), "Inserted profile");
        Ok(())
    }

    async fn append_interaction(
        &self,
        id: &UserId,
        interaction: Interaction,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut stored = self
            .read_stored(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        stored.interactions.push(interaction);
        self.write_stored(&stored, id).await
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.write_record(self.record_path("feedback", feedback.id), feedback)
            .await
    }

    async fn insert_rating(&self, rating: &RatingRecord) -> Result<(), StoreError> {
        self.write_record(self.record_path("ratings", rating.id), rating)
            .await
    }
}
