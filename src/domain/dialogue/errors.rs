//! Dialogue error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::scenario::ScenarioError;
use crate::ports::{CompletionError, StoreError};

/// Errors raised while handling a turn.
///
/// Most of these are recovered inside the orchestrator and turned into
/// user-facing output; only `SessionTerminated` and `InvalidTransition`
/// escape `handle_input`.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("'{input}' is not one of the {available} listed options")]
    InvalidSelection { input: String, available: usize },

    #[error("the sitting has already ended")]
    SessionTerminated,

    #[error("invalid dialogue transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DialogueError {
    pub fn invalid_selection(input: impl Into<String>, available: usize) -> Self {
        Self::InvalidSelection {
            input: input.into(),
            available,
        }
    }
}
