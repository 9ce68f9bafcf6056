use std::env;

use crate::errors::RelayError;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_signing_secret: Option<String>,
    pub slack_client_id: Option<String>,
    pub slack_client_secret: Option<String>,
    pub slack_redirect_url: Option<String>,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads the relay configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::ConfigError` when `SLACK_BOT_TOKEN` or
    /// `OPENAI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, RelayError> {
        Ok(Self {
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            slack_signing_secret: optional("SLACK_SIGNING_SECRET"),
            slack_client_id: optional("CLIENT_ID"),
            slack_client_secret: optional("CLIENT_SECRET"),
            slack_redirect_url: optional("REDIRECT_URI"),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: optional("OPENAI_ORG_ID"),
            openai_model: optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            port: parse_port(optional("PORT").as_deref()),
        })
    }
}

fn required(name: &str) -> Result<String, RelayError> {
    env::var(name).map_err(|e| RelayError::ConfigError(format!("{}: {}", name, e)))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a listen port, falling back to [`DEFAULT_PORT`] for absent or bad values.
#[must_use]
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
