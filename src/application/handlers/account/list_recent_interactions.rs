//! ListRecentInteractions - query for a user's latest turns, oldest first.

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::foundation::UserId;
use crate::domain::user::Interaction;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct ListRecentInteractionsQuery {
    pub user_id: UserId,
    pub limit: usize,
}

pub struct ListRecentInteractionsHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl ListRecentInteractionsHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListRecentInteractionsQuery,
    ) -> Result<Vec<Interaction>, ApplicationError> {
        Ok(self
            .repository
            .recent_interactions(&query.user_id, query.limit)
            .await?)
    }
}
