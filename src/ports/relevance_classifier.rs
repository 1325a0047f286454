//! RelevanceClassifier port - decides whether free text is on-topic.

use async_trait::async_trait;

/// Decides whether a user's message is about mental health.
///
/// Infallible by contract: implementations that depend on a remote service
/// pick a side when the service is unavailable.
#[async_trait]
pub trait RelevanceClassifier: Send + Sync {
    async fn is_relevant(&self, text: &str) -> bool;
}

/// Classifier that accepts everything. Used when the check is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl RelevanceClassifier for AcceptAll {
    async fn is_relevant(&self, _text: &str) -> bool {
        true
    }
}
