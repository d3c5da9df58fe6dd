//! AI provider abstraction for the compliance review.
//!
//! A trait-based seam so the Gemini backend can be swapped for a mock
//! in tests.

pub mod gemini;
pub mod mock;

use crate::services::content::InlineDocument;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for document-review providers (e.g., Gemini).
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Submit the attached documents plus a framing prompt under a fixed
    /// system instruction and return the generated report text.
    async fn review(
        &self,
        system_instruction: &str,
        documents: &[InlineDocument],
        prompt: &str,
    ) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
