//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `scenario` - The scenario tree and its JSON schema
//! - `conversation` - Messages and the per-sitting session
//! - `user` - Profiles, interactions, feedback, ratings
//! - `dialogue` - The per-sitting state machine and its helpers

pub mod conversation;
pub mod dialogue;
pub mod foundation;
pub mod scenario;
pub mod user;
