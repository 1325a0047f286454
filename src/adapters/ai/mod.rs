//! Completion Gateway Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIGateway` - any OpenAI-compatible chat completions endpoint
//! - `MockCompletionGateway` - scripted replies for tests and offline runs
//! - `CompletionRelevanceClassifier` - relevance check via a completion call

mod completion_classifier;
mod mock_provider;
mod openai_provider;

pub use completion_classifier::CompletionRelevanceClassifier;
pub use mock_provider::{MockCompletionGateway, MockResponse, DEFAULT_MOCK_REPLY};
pub use openai_provider::{OpenAIConfig, OpenAIGateway, DEFAULT_BASE_URL, DEFAULT_MODEL};
