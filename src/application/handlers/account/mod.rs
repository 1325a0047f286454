//! Account and sitting-lifecycle handlers.

mod authenticate_user;
mod list_recent_interactions;
pub(crate) mod register_user;
mod submit_session_feedback;

pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserHandler};
pub use list_recent_interactions::{ListRecentInteractionsHandler, ListRecentInteractionsQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use submit_session_feedback::{SubmitSessionFeedbackCommand, SubmitSessionFeedbackHandler};
