//! SubmitSessionFeedback - stores the end-of-sitting rating and comment.

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::foundation::{SessionRating, UserId};
use crate::domain::user::{Feedback, RatingRecord};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct SubmitSessionFeedbackCommand {
    pub user_id: UserId,
    pub rating: SessionRating,
    /// Blank feedback is not stored.
    pub feedback: String,
}

pub struct SubmitSessionFeedbackHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl SubmitSessionFeedbackHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SubmitSessionFeedbackCommand) -> Result<(), ApplicationError> {
        let rating = RatingRecord::new(cmd.user_id.clone(), cmd.rating);
        self.repository.insert_rating(&rating).await?;

        let text = cmd.feedback.trim();
        if !text.is_empty() {
            let feedback = Feedback::new(cmd.user_id.clone(), text);
            self.repository.insert_feedback(&feedback).await?;
        }

        tracing::info!(user = %cmd.user_id, rating = cmd.rating.value(), "Session feedback stored");
        Ok(())
    }
}
