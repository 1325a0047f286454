//! Relevance classifier backed by a completion round-trip.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::conversation::ConversationMessage;
use crate::domain::dialogue::prompts::relevance_prompt;
use crate::ports::{CompletionGateway, CompletionPurpose, CompletionRequest, RelevanceClassifier};

/// Asks the completion service whether text is about mental health. The
/// text is relevant when the reply opens with the word "yes".
///
/// If the service fails the text is treated as relevant, so the failure
/// resurfaces on the main reply and reaches the user as an apology.
pub struct CompletionRelevanceClassifier {
    gateway: Arc<dyn CompletionGateway>,
}

impl CompletionRelevanceClassifier {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RelevanceClassifier for CompletionRelevanceClassifier {
    async fn is_relevant(&self, text: &str) -> bool {
        let request = CompletionRequest::new(CompletionPurpose::Classification)
            .with_message(ConversationMessage::user(relevance_prompt(text)));

        match self.gateway.complete(request).await {
            Ok(response) => {
                let relevant = is_affirmative(&response.content);
                tracing::debug!(relevant, "Classified input relevance");
                relevant
            }
            Err(e) => {
                tracing::warn!(error = %e, "Relevance check failed, treating input as relevant");
                true
            }
        }
    }
}

/// True when the first word of `reply` is "yes", ignoring case and any
/// surrounding punctuation.
fn is_affirmative(reply: &str) -> bool {
    reply
        .split_whitespace()
        .next()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| word.eq_ignore_ascii_case("yes"))
}
