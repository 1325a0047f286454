//! AuthenticateUser - verifies an e-mail and password pair.

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;
use crate::ports::{CredentialHasher, ProfileRepository};

#[derive(Debug, Clone)]
pub struct AuthenticateUserCommand {
    pub email: String,
    pub password: String,
}

pub struct AuthenticateUserHandler {
    repository: Arc<dyn ProfileRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AuthenticateUserHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Unknown accounts and wrong passwords both yield `InvalidCredentials`.
    pub async fn handle(
        &self,
        cmd: AuthenticateUserCommand,
    ) -> Result<UserProfile, ApplicationError> {
        let id = UserId::new(&cmd.email).map_err(|_| ApplicationError::InvalidCredentials)?;

        let profile = self
            .repository
            .find_profile(&id)
            .await?
            .ok_or(ApplicationError::InvalidCredentials)?;

        if !self.hasher.verify(&cmd.password, profile.credential_hash())? {
            tracing::warn!(user = %id, "Failed login attempt");
            return Err(ApplicationError::InvalidCredentials);
        }

        tracing::info!(user = %id, "User authenticated");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::profile::InMemoryProfileRepository;
    use crate::application::handlers::account::register_user::test_support::PrefixHasher;
    use crate::domain::user::Demographics;

    async fn seeded() -> Arc<InMemoryProfileRepository> {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let demographics = Demographics::new("Ana", 29, "female", "usa", "nurse").unwrap();
        let profile = UserProfile::new(
            UserId::new("ana@example.com").unwrap(),
            demographics,
            "hashed:pw",
        );
        repo.insert_profile(&profile).await.unwrap();
        repo
    }

    fn command(email: &str, password: &str) -> AuthenticateUserCommand {
        AuthenticateUserCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn correct_password_returns_profile() {
        let handler = AuthenticateUserHandler::new(seeded().await, Arc::new(PrefixHasher));
        let profile = handler
            .handle(command("ANA@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(profile.name(), "Ana");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let handler = AuthenticateUserHandler::new(seeded().await, Arc::new(PrefixHasher));
        assert!(matches!(
            handler.handle(command("ana@example.com", "nope")).await,
            Err(ApplicationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn unknown_account_is_rejected() {
        let handler = AuthenticateUserHandler::new(seeded().await, Arc::new(PrefixHasher));
        assert!(matches!(
            handler.handle(command("bob@example.com", "pw")).await,
            Err(ApplicationError::InvalidCredentials)
        ));
    }
}
