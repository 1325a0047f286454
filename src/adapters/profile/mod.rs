//! Profile persistence adapters.
//!
//! - `FileProfileRepository` - encrypted YAML documents under a data directory
//! - `InMemoryProfileRepository` - same encoding, kept in memory
//! - `ProfileCodec` - field encryption at the persistence boundary

mod codec;
mod file_repository;
mod in_memory;

pub use codec::{ProfileCodec, StoredProfile};
pub use file_repository::FileProfileRepository;
pub use in_memory::InMemoryProfileRepository;
