//! Scripted completion gateway for tests and offline runs.
//!
//! Replies are consumed in the order they were queued; once the queue is
//! empty every call returns a fixed default reply.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockCompletionGateway::new()
//!     .with_response("That sounds hard.")
//!     .with_error(CompletionError::EmptyCompletion);
//!
//! assert_eq!(gateway.complete_one("hi").await?, "That sounds hard.");
//! assert!(gateway.complete_one("again").await.is_err());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionError, CompletionGateway, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Reply returned when nothing is queued.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// A queued mock outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(CompletionError),
}

/// Completion gateway that replays queued responses and records requests.
#[derive(Debug, Clone)]
pub struct MockCompletionGateway {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    info: ProviderInfo,
    delay: Duration,
}

impl Default for MockCompletionGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionGateway {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on a shared handle.
    pub fn push(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_MOCK_REPLY.to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CompletionGateway for MockCompletionGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => {
                Ok(CompletionResponse::new(content, self.info.model.clone()))
            }
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
