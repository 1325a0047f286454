//! Application layer errors.

use thiserror::Error;

use crate::domain::foundation::{UserId, ValidationError};
use crate::ports::{CredentialError, StoreError};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an account already exists for {0}")]
    AccountExists(UserId),

    #[error("incorrect e-mail or password")]
    InvalidCredentials,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
