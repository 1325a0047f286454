//! RegisterUser - creates a profile with a hashed credential.

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::foundation::UserId;
use crate::domain::user::{Demographics, UserProfile};
use crate::ports::{CredentialHasher, ProfileRepository, StoreError};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub country: String,
    pub occupation: String,
}

/// Handler for user registration.
pub struct RegisterUserHandler {
    repository: Arc<dyn ProfileRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl RegisterUserHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<UserProfile, ApplicationError> {
        let id = UserId::new(&cmd.email)?;
        let demographics =
            Demographics::new(cmd.name, cmd.age, cmd.sex, cmd.country, cmd.occupation)?;

        if self.repository.find_profile(&id).await?.is_some() {
            return Err(ApplicationError::AccountExists(id));
        }

        let hash = self.hasher.hash(&cmd.password)?;
        let profile = UserProfile::new(id, demographics, hash);

        match self.repository.insert_profile(&profile).await {
            Ok(()) => {}
            Err(StoreError::DuplicateId(id)) => return Err(ApplicationError::AccountExists(id)),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user = %profile.id(), "Registered user");
        Ok(profile)
    }
}
