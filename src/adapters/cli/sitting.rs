//! Console sitting: the dialogue loop plus the closing rating and feedback.

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::render::render_output;
use super::{CliError, Console};
use crate::application::{SubmitSessionFeedbackCommand, SubmitSessionFeedbackHandler};
use crate::domain::dialogue::{
    DialogueError, DialogueOrchestrator, DialogueOutput, DialogueState, DialogueTurn,
};
use crate::domain::foundation::SessionRating;

const SELECT_PROMPT: &str =
    "Please select a scenario by entering the corresponding number or type your own scenario:";
const CONTINUE_HINT: &str =
    "\nYou can continue the conversation, type 'scenario' for the menu, or 'exit' to end the session.";

pub struct ConsoleSitting {
    product_name: String,
    feedback: SubmitSessionFeedbackHandler,
}

impl ConsoleSitting {
    pub fn new(product_name: impl Into<String>, feedback: SubmitSessionFeedbackHandler) -> Self {
        Self {
            product_name: product_name.into(),
            feedback,
        }
    }

    /// Runs the dialogue until an exit keyword or end of input. A rating
    /// and feedback are collected only after an explicit exit.
    pub async fn run<R, W>(
        &self,
        console: &mut Console<R, W>,
        mut orchestrator: DialogueOrchestrator,
    ) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let opening = orchestrator.start().await?;
        for output in &opening.outputs {
            if matches!(output, DialogueOutput::Options(_)) {
                console.say(SELECT_PROMPT).await?;
            }
            if let Some(text) = render_output(output) {
                console.say(&text).await?;
            }
        }

        loop {
            let input = match console.ask("").await {
                Ok(input) => input,
                Err(CliError::InputClosed) => {
                    tracing::info!(user = %orchestrator.profile().id(), "Input closed mid-sitting");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let turn = match orchestrator.handle_input(&input).await {
                Ok(turn) => turn,
                Err(DialogueError::SessionTerminated) => break,
                Err(e) => return Err(e.into()),
            };
            show(console, &turn).await?;

            match turn.state {
                DialogueState::Terminated => break,
                DialogueState::FreeFormDialogue if has_reply(&turn) => {
                    console.say(CONTINUE_HINT).await?;
                }
                _ => {}
            }
        }

        console
            .say(&format!(
                "Thank you for using {}. Before you go, we would appreciate your feedback to help us improve.",
                self.product_name
            ))
            .await?;

        match self.close(console, &orchestrator).await {
            Ok(()) | Err(CliError::InputClosed) => {}
            Err(e) => return Err(e),
        }
        console.say("Goodbye! Take care.").await?;
        Ok(())
    }

    async fn close<R, W>(
        &self,
        console: &mut Console<R, W>,
        orchestrator: &DialogueOrchestrator,
    ) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let rating = loop {
            let answer = console
                .ask("Please rate your experience with the chatbot (1 to 5):")
                .await?;
            match SessionRating::parse(&answer) {
                Ok(rating) => break rating,
                Err(_) => {
                    console
                        .say("Invalid rating. Please enter a number between 1 and 5.")
                        .await?
                }
            }
        };
        let feedback = console
            .ask("Please provide your feedback on the chatbot experience:")
            .await?;

        let result = self
            .feedback
            .handle(SubmitSessionFeedbackCommand {
                user_id: orchestrator.profile().id().clone(),
                rating,
                feedback,
            })
            .await;

        match result {
            Ok(()) => console.say("Thank you for your feedback!").await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to store session feedback");
                console
                    .say("Sorry, there was an error saving your feedback. Please try again later.")
                    .await
            }
        }
    }
}

async fn show<R, W>(console: &mut Console<R, W>, turn: &DialogueTurn) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for output in &turn.outputs {
        if let Some(text) = render_output(output) {
            console.say(&text).await?;
        }
    }
    Ok(())
}

fn has_reply(turn: &DialogueTurn) -> bool {
    turn.outputs
        .iter()
        .any(|o| matches!(o, DialogueOutput::Reply(_)))
}
