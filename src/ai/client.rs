//! LLM (`OpenAI`) API client module
//!
//! Sends chat completion requests and extracts the assistant text.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use super::CompletionService;
use super::prompt_builder::build_prompt;
use crate::errors::RelayError;

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Serializes prompt messages into the chat completions wire shape.
#[must_use]
pub fn to_wire_messages(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .map(|msg| {
            let role_str = match msg.role {
                MessageRole::system => "system",
                MessageRole::assistant => "assistant",
                _ => "user",
            };

            let content_val = match &msg.content {
                Content::Text(text) => json!(text),
                _ => json!(""),
            };

            json!({
                "role": role_str,
                "content": content_val
            })
        })
        .collect()
}

/// Pulls `choices[0].message.content` out of a chat completions response.
#[must_use]
pub fn extract_completion_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(std::string::ToString::to_string)
}

/// LLM API client for generating summaries
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: String,
    ) -> Self {
        Self {
            api_key,
            org_id,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn create_completion(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, RelayError> {
        let prompt = build_prompt(system_instruction, user_text);

        #[cfg(feature = "debug-logs")]
        info!("Using completion prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            "Requesting completion, estimated input tokens: {}",
            estimate_tokens(user_text) + estimate_tokens(system_instruction)
        );

        let request_body = json!({
            "model": self.model_name,
            "messages": to_wire_messages(&prompt),
        });

        let mut request = HTTP_CLIENT
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RelayError::UpstreamError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RelayError::UpstreamError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            RelayError::UpstreamError(format!("Failed to parse completion response: {}", e))
        })?;

        extract_completion_text(&response_json)
            .ok_or_else(|| RelayError::UpstreamError("No text in response".to_string()))
    }
}
