//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;

pub use account::{
    AuthenticateUserCommand, AuthenticateUserHandler, ListRecentInteractionsHandler,
    ListRecentInteractionsQuery, RegisterUserCommand, RegisterUserHandler,
    SubmitSessionFeedbackCommand, SubmitSessionFeedbackHandler,
};
