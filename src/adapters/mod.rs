//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - completion gateways (OpenAI-compatible HTTP, scripted mock) and
//!   the completion-backed relevance classifier
//! - `auth` - Argon2 credential hashing
//! - `cli` - console driver for a sitting
//! - `crypto` - AES-256-GCM field cipher
//! - `profile` - encrypted profile repositories

pub mod ai;
pub mod auth;
pub mod cli;
pub mod crypto;
pub mod profile;
