//! End-of-sitting feedback and rating records.

use crate::domain::foundation::{RecordId, SessionRating, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Free-text feedback left when a sitting ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: RecordId,
    pub user_id: UserId,
    pub text: String,
    pub submitted_at: Timestamp,
}

impl Feedback {
    pub fn new(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            user_id,
            text: text.into().trim().to_string(),
            submitted_at: Timestamp::now(),
        }
    }
}

/// A 1-5 rating of a sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub rating: SessionRating,
    pub submitted_at: Timestamp,
}

impl RatingRecord {
    pub fn new(user_id: UserId, rating: SessionRating) -> Self {
        Self {
            id: RecordId::new(),
            user_id,
            rating,
            submitted_at: Timestamp::now(),
        }
    }
}
