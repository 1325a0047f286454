//! CredentialHasher port - one-way password hashing.

/// Hashing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("stored credential is not a valid hash")]
    MalformedHash,
}

/// Hashes and verifies passwords. The hash is opaque to callers.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Returns `Ok(false)` for a wrong password and an error only for an
    /// unusable stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}
