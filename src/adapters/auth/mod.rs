//! Credential adapters.
//!
//! - `Argon2Hasher` - production password hashing

mod argon2_hasher;

pub use argon2_hasher::Argon2Hasher;
