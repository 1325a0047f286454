//! Wires onboarding, the orchestrator, and the sitting loop together.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};

use super::{CliError, Console, ConsoleSitting, Onboarding};
use crate::application::{
    AuthenticateUserHandler, RegisterUserHandler, SubmitSessionFeedbackHandler,
};
use crate::domain::dialogue::{DialogueDependencies, DialogueOrchestrator, DialogueSettings};
use crate::ports::CredentialHasher;

/// A complete console session for one user.
pub struct ConsoleApp {
    deps: DialogueDependencies,
    settings: DialogueSettings,
    onboarding: Onboarding,
    sitting: ConsoleSitting,
}

impl ConsoleApp {
    pub fn new(
        deps: DialogueDependencies,
        hasher: Arc<dyn CredentialHasher>,
        settings: DialogueSettings,
    ) -> Self {
        let product = settings.persona_name.clone();
        let onboarding = Onboarding::new(
            product.clone(),
            RegisterUserHandler::new(deps.repository.clone(), hasher.clone()),
            AuthenticateUserHandler::new(deps.repository.clone(), hasher),
        );
        let sitting = ConsoleSitting::new(
            product,
            SubmitSessionFeedbackHandler::new(deps.repository.clone()),
        );
        Self {
            deps,
            settings,
            onboarding,
            sitting,
        }
    }

    pub async fn run<R, W>(&self, console: &mut Console<R, W>) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let profile = self.onboarding.run(console).await?;
        console
            .say(&format!(
                "Welcome to {}, {}! Your mental health chatbot.",
                self.settings.persona_name,
                profile.name()
            ))
            .await?;

        tracing::info!(user = %profile.id(), "Sitting started");
        let orchestrator =
            DialogueOrchestrator::new(self.deps.clone(), profile, self.settings.clone());
        self.sitting.run(console, orchestrator).await
    }
}
