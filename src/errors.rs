use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access completion service: {0}")]
    UpstreamError(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),
}

impl RelayError {
    /// Re-tags any error as a failed post, keeping its message.
    #[must_use]
    pub fn into_delivery(self) -> Self {
        match self {
            RelayError::DeliveryError(_) => self,
            other => RelayError::DeliveryError(other.to_string()),
        }
    }

    /// Whether a retry could succeed. Only transport failures qualify; Slack
    /// `ok: false` answers such as `channel_not_found` are final.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, RelayError::HttpError(_))
    }
}

impl From<SlackClientError> for RelayError {
    fn from(error: SlackClientError) -> Self {
        RelayError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(error: anyhow::Error) -> Self {
        RelayError::ApiError(error.to_string())
    }
}
