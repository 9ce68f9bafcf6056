use tracing::debug;

use crate::ai::CompletionService;
use crate::ai::prompt_builder::instruction_for;
use crate::core::models::{Summary, SummaryStyle};
use crate::errors::RelayError;

/// Stateless adapter from a text segment to a plain-text summary.
pub struct Summarizer<'a> {
    completion: &'a dyn CompletionService,
}

impl<'a> Summarizer<'a> {
    #[must_use]
    pub fn new(completion: &'a dyn CompletionService) -> Self {
        Self { completion }
    }

    /// # Errors
    ///
    /// Returns `RelayError::UpstreamError` when the completion call fails or
    /// yields only whitespace.
    pub async fn summarize(&self, text: &str, style: SummaryStyle) -> Result<Summary, RelayError> {
        let raw = self
            .completion
            .create_completion(instruction_for(style), text)
            .await
            .map_err(|e| match e {
                RelayError::UpstreamError(_) => e,
                other => RelayError::UpstreamError(other.to_string()),
            })?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RelayError::UpstreamError(
                "completion service returned an empty summary".to_string(),
            ));
        }

        debug!(?style, chars = trimmed.len(), "Summary generated");
        Ok(Summary {
            text: trimmed.to_string(),
        })
    }
}
