//! DialogueState - where a sitting currently is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle of one sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Showing the top-level scenarios.
    #[default]
    AwaitingScenarioChoice,
    /// Showing the children of the current path.
    AwaitingSubScenarioChoice,
    /// Free text goes to the completion service.
    FreeFormDialogue,
    /// The user left. Nothing is accepted after this.
    Terminated,
}

impl DialogueState {
    /// Returns true while the sitting accepts input.
    pub fn is_active(&self) -> bool {
        !matches!(self, DialogueState::Terminated)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            AwaitingScenarioChoice => vec![AwaitingSubScenarioChoice, FreeFormDialogue, Terminated],
            AwaitingSubScenarioChoice => vec![
                AwaitingSubScenarioChoice,
                AwaitingScenarioChoice,
                FreeFormDialogue,
                Terminated,
            ],
            FreeFormDialogue => vec![AwaitingScenarioChoice, Terminated],
            Terminated => vec![],
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogueState::AwaitingScenarioChoice => "AwaitingScenarioChoice",
            DialogueState::AwaitingSubScenarioChoice => "AwaitingSubScenarioChoice",
            DialogueState::FreeFormDialogue => "FreeFormDialogue",
            DialogueState::Terminated => "Terminated",
        };
        write!(f, "{}", s)
    }
}
