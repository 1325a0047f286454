//! Argon2id implementation of the `CredentialHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::ports::{CredentialError, CredentialHasher};

/// Hashes passwords with Argon2id and a random salt per hash.
///
/// Output is a PHC string (`$argon2id$v=19$...`), so parameters travel
/// with the hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(hash).map_err(|_| CredentialError::MalformedHash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::Hashing(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_same_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("s3cret").unwrap();
        assert!(!hasher.verify("guess", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2Hasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(
            Argon2Hasher::new().hash(""),
            Err(CredentialError::EmptyPassword)
        );
    }

    #[test]
    fn garbage_hash_is_malformed() {
        assert_eq!(
            Argon2Hasher::new().verify("pw", "not-a-hash"),
            Err(CredentialError::MalformedHash)
        );
    }
}
