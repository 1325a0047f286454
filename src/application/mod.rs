//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Separate handlers cover writes (register, feedback) and reads (login,
//! recent interactions).

mod error;
pub mod handlers;

pub use error::ApplicationError;
pub use handlers::{
    AuthenticateUserCommand, AuthenticateUserHandler, ListRecentInteractionsHandler,
    ListRecentInteractionsQuery, RegisterUserCommand, RegisterUserHandler,
    SubmitSessionFeedbackCommand, SubmitSessionFeedbackHandler,
};
