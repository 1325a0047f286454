//! Completion Gateway Port - the single seam to the text-generation service.
//!
//! The dialogue engine treats the service as opaque: a list of role-tagged
//! messages goes in, the first completion's text comes out.
//!
//! # Design
//!
//! - Non-streaming only; one outstanding request per sitting
//! - No internal retries; retry policy belongs to the caller
//! - Holds no session state
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoGateway;
//!
//! #[async_trait]
//! impl CompletionGateway for EchoGateway {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
//!         let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(CompletionResponse::new(last, "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::ConversationMessage;

/// Port for completion service interactions.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends the request and returns the primary completion.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, CompletionError>;

    /// Sends a single synthetic user message and returns the completion text.
    async fn complete_one(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(CompletionPurpose::Auxiliary)
            .with_message(ConversationMessage::user(prompt));
        Ok(self.complete(request).await?.content)
    }

    /// Provider name and model, for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Why a request is being made. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPurpose {
    /// A reply shown to the user.
    Reply,
    /// Relevance classification.
    Classification,
    /// Scenario tree expansion.
    Expansion,
    /// Anything else sent as a single prompt.
    Auxiliary,
}

impl CompletionPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Classification => "classification",
            Self::Expansion => "expansion",
            Self::Auxiliary => "auxiliary",
        }
    }
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Context window, oldest first.
    pub messages: Vec<ConversationMessage>,
    /// Extra system instruction sent ahead of `messages`.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    pub purpose: CompletionPurpose,
}

impl CompletionRequest {
    pub fn new(purpose: CompletionPurpose) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            purpose,
        }
    }

    /// Adds a message to the context window.
    pub fn with_message(mut self, message: ConversationMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Replaces the context window.
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = ConversationMessage>) -> Self {
        self.messages = messages.into_iter().collect();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A completion returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Text of the first choice.
    pub content: String,
    /// Model that generated it.
    pub model: String,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Provider name and model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx status or an unreadable payload.
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status, or 200 when the payload itself was unusable.
        status: u16,
        message: String,
    },

    /// The context window exceeds the model's limit.
    #[error("context too long: {0}")]
    ContextTooLong(String),

    /// The service returned zero choices.
    #[error("completion service returned no choices")]
    EmptyCompletion,
}

impl CompletionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn context_too_long(message: impl Into<String>) -> Self {
        Self::ContextTooLong(message.into())
    }
}
