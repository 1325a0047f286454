//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionGateway` - the text-generation service
//! - `RelevanceClassifier` - on-topic check for free-form input
//! - `ProfileRepository` - encrypted user profiles, feedback, ratings
//! - `CredentialHasher` - password hashing

mod completion_gateway;
mod credential_hasher;
mod profile_repository;
mod relevance_classifier;

pub use completion_gateway::{
    CompletionError, CompletionGateway, CompletionPurpose, CompletionRequest, CompletionResponse,
    ProviderInfo,
};
pub use credential_hasher::{CredentialError, CredentialHasher};
pub use profile_repository::{ProfileRepository, StoreError};
pub use relevance_classifier::{AcceptAll, RelevanceClassifier};
