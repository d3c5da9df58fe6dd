//! Mock provider implementation for testing.

use super::{ProviderError, ReviewProvider};
use crate::services::content::InlineDocument;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock review provider with a canned reply or a forced failure, plus a
/// call counter so tests can assert how many remote calls were made.
pub struct MockReviewProvider {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockReviewProvider {
    pub fn succeeding(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewProvider for MockReviewProvider {
    async fn review(
        &self,
        _system_instruction: &str,
        _documents: &[InlineDocument],
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ProviderError::ApiError(
                "mock upstream rejected the request".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.reply.is_some() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "mock provider set to fail".to_string(),
            ))
        }
    }
}
