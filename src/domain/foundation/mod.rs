//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Solace domain.

mod errors;
mod ids;
mod rating;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{RecordId, UserId};
pub use rating::SessionRating;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
