//! Mapping between `UserProfile` and its encrypted stored form.

use serde::{Deserialize, Serialize};

use crate::adapters::crypto::{CipherError, FieldCipher};
use crate::domain::foundation::UserId;
use crate::domain::user::{Demographics, Interaction, UserProfile};
use crate::ports::StoreError;

/// A profile as written to storage. Demographic fields are ciphertext;
/// `id`, `credential_hash`, and `interactions` are kept in the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: String,
    pub name: String,
    pub age: String,
    pub sex: String,
    pub country: String,
    pub occupation: String,
    pub credential_hash: String,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Encrypts and decrypts profiles at the persistence boundary.
#[derive(Debug, Clone)]
pub struct ProfileCodec {
    cipher: FieldCipher,
}

impl ProfileCodec {
    pub fn new(cipher: FieldCipher) -> Self {
        Self { cipher }
    }

    pub fn encode(&self, profile: &UserProfile) -> Result<StoredProfile, StoreError> {
        let d = profile.demographics();
        Ok(StoredProfile {
            id: profile.id().as_str().to_string(),
            name: self.seal(&d.name)?,
            age: self.seal(&d.age.to_string())?,
            sex: self.seal(&d.sex)?,
            country: self.seal(&d.country)?,
            occupation: self.seal(&d.occupation)?,
            credential_hash: profile.credential_hash().to_string(),
            interactions: profile.interactions().to_vec(),
        })
    }

    /// Fails with `StoreError::Decryption` naming the first unreadable field.
    pub fn decode(&self, stored: StoredProfile) -> Result<UserProfile, StoreError> {
        let id = UserId::new(&stored.id)
            .map_err(|e| StoreError::serialization(format!("stored id is invalid: {}", e)))?;

        let age = self
            .open("age", &stored.age)?
            .parse::<u32>()
            .map_err(|_| StoreError::decryption("age"))?;

        let demographics = Demographics {
            name: self.open("name", &stored.name)?,
            age,
            sex: self.open("sex", &stored.sex)?,
            country: self.open("country", &stored.country)?,
            occupation: self.open("occupation", &stored.occupation)?,
        };

        Ok(UserProfile::reconstitute(
            id,
            demographics,
            stored.credential_hash,
            stored.interactions,
        ))
    }

    fn seal(&self, value: &str) -> Result<String, StoreError> {
        self.cipher
            .encrypt(value)
            .map_err(|e| StoreError::encryption(e.to_string()))
    }

    fn open(&self, field: &str, value: &str) -> Result<String, StoreError> {
        self.cipher.decrypt(value).map_err(|e: CipherError| {
            tracing::error!(field, error = %e, "Failed to decrypt profile field");
            StoreError::decryption(field)
        })
    }
}
