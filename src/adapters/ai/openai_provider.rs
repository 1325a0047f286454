//! OpenAI-compatible completion gateway.
//!
//! Talks to any `/chat/completions` endpoint that follows OpenAI's request
//! and response shapes (OpenAI itself, Together, local servers).
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("meta-llama/Meta-Llama-3.1-405B-Instruct-Turbo")
//!     .with_base_url("https://api.together.xyz/v1");
//!
//! let gateway = OpenAIGateway::new(config)?;
//! ```
//!
//! Requests are never retried. The HTTP client carries a timeout so a hung
//! upstream surfaces as a transport error instead of blocking the sitting.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    CompletionError, CompletionGateway, CompletionRequest, CompletionResponse, ProviderInfo,
};

pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/Meta-Llama-3.1-405B-Instruct-Turbo";

/// Configuration for the gateway.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gateway backed by an OpenAI-compatible HTTP API.
pub struct OpenAIGateway {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIGateway {
    pub fn new(config: OpenAIConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(prompt.clone()),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: msg.role.as_str().to_string(),
                content: Some(msg.content.clone()),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Maps a non-2xx status and its body to an error.
fn status_error(status: u16, body: &str) -> CompletionError {
    if status == 400
        && (body.contains("maximum context length")
            || body.contains("context_length_exceeded"))
    {
        return CompletionError::context_too_long(body);
    }
    CompletionError::upstream(status, body)
}

/// Extracts the first choice's text from a 2xx body.
fn parse_completion_body(body: &str) -> Result<CompletionResponse, CompletionError> {
    let parsed: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::upstream(200, format!("unreadable payload: {}", e)))?;

    let choices = parsed
        .choices
        .ok_or_else(|| CompletionError::upstream(200, "payload has no choices field"))?;

    let choice = choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyCompletion)?;

    let content = choice
        .message
        .content
        .ok_or_else(|| CompletionError::upstream(200, "first choice has no content"))?;

    Ok(CompletionResponse::new(content, parsed.model.unwrap_or_default()))
}

#[async_trait]
impl CompletionGateway for OpenAIGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = self.to_openai_request(&request);
        tracing::debug!(
            purpose = request.purpose.as_str(),
            messages = body.messages.len(),
            model = %self.config.model,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::transport(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    CompletionError::transport(format!("connection failed: {}", e))
                } else {
                    CompletionError::transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::transport(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        parse_completion_body(&text)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai-compatible", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: Option<String>,
    choices: Option<Vec<OpenAIChoice>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}
