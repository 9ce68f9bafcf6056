//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;

use async_trait::async_trait;

use crate::errors::RelayError;

// Re-export main types for convenience
pub use client::{LlmClient, estimate_tokens};

/// A chat completion backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Runs one completion with a fixed system framing and the user's text.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UpstreamError` when the service is unreachable or
    /// the response carries no text.
    async fn create_completion(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, RelayError>;
}
