use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::info;

use crate::core::config::AppConfig;
use crate::errors::RelayError;

/// Bot scopes requested when the app is installed into a workspace.
pub const BOT_SCOPES: [&str; 12] = [
    "app_mentions:read",
    "channels:history",
    "chat:write",
    "groups:history",
    "im:history",
    "mpim:history",
    "channels:join",
    "channels:read",
    "groups:read",
    "mpim:read",
    "im:read",
    "users:read",
];

const OAUTH_ACCESS_URL: &str = "https://slack.com/api/oauth.v2.access";

/// Result of exchanging an OAuth code with Slack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthExchange {
    Authorized { team_id: Option<String> },
    /// Slack answered `ok: false` with this error code.
    Rejected(String),
}

/// Builds the install URL, or `None` when client id or redirect URI is not configured.
#[must_use]
pub fn build_authorize_url(config: &AppConfig, state: &str) -> Option<String> {
    let client_id = config.slack_client_id.as_deref()?;
    let redirect_url = config.slack_redirect_url.as_deref()?;

    let scopes = utf8_percent_encode(&BOT_SCOPES.join(","), NON_ALPHANUMERIC).to_string();
    let redirect_uri = utf8_percent_encode(redirect_url, NON_ALPHANUMERIC).to_string();
    Some(format!(
        "https://slack.com/oauth/v2/authorize?client_id={client_id}&scope={scopes}&redirect_uri={redirect_uri}&state={state}"
    ))
}

/// Exchanges the OAuth `code` at `oauth.v2.access`.
///
/// # Errors
///
/// Returns `ConfigError` when the OAuth client settings are missing, and an
/// HTTP or parse error when Slack cannot be reached or answers garbage.
pub async fn exchange_code(
    config: &AppConfig,
    http: &HttpClient,
    code: &str,
) -> Result<OAuthExchange, RelayError> {
    let (Some(client_id), Some(client_secret), Some(redirect_url)) = (
        config.slack_client_id.as_deref(),
        config.slack_client_secret.as_deref(),
        config.slack_redirect_url.as_deref(),
    ) else {
        return Err(RelayError::ConfigError(
            "CLIENT_ID, CLIENT_SECRET and REDIRECT_URI must be set".to_string(),
        ));
    };

    let payload = [
        ("code", code),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("redirect_uri", redirect_url),
    ];

    let body: Value = http
        .post(OAUTH_ACCESS_URL)
        .form(&payload)
        .send()
        .await?
        .json()
        .await
        .map_err(|e| RelayError::ParseError(format!("oauth.v2.access parse: {e}")))?;

    if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        let err = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        return Ok(OAuthExchange::Rejected(err.to_string()));
    }

    let team_id = body
        .get("team")
        .and_then(|t| t.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    info!(team_id = ?team_id, "App installed via OAuth");
    Ok(OAuthExchange::Authorized { team_id })
}
