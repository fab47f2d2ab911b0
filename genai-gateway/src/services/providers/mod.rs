//! Model capability abstraction and implementations.
//!
//! The gateway talks to the model through [`ContentGenerator`] so the Gemini
//! client can be swapped for the mock in tests and local runs.

pub mod gemini;
pub mod mock;

use crate::models::ModelInferenceRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

/// The remote generative model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Run one `generateContent` call and return the generated text.
    async fn generate_content(
        &self,
        request: &ModelInferenceRequest,
    ) -> Result<String, ProviderError>;

    /// Readiness probe.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
