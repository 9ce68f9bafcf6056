//! HTTP entrypoint - thin router that delegates to specialized handlers.
//!
//! - `POST /slack/events`: signature check, then the Events API (`event_handler`)
//! - `GET /slack/oauth_redirect`: OAuth install callback (`oauth`)

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::event_handler::{EventAck, accept_event};
use super::oauth::{OAuthExchange, exchange_code};
use super::{helpers, parsing, signature};
use crate::core::config::AppConfig;
use crate::errors::RelayError;
use crate::worker::FanoutDispatcher;

/// Read-only process-wide dependencies shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Arc<FanoutDispatcher>,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, dispatcher: Arc<FanoutDispatcher>) -> Self {
        Self {
            config,
            dispatcher,
            http: reqwest::Client::new(),
        }
    }

    /// Builds the production Slack and `OpenAI` clients from `config`.
    #[must_use]
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let dispatcher = Arc::new(FanoutDispatcher::from_config(&config));
        Self::new(config, dispatcher)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .route("/slack/oauth_redirect", get(oauth_redirect))
        .with_state(state)
}

#[tracing::instrument(level = "debug", skip_all)]
async fn slack_events(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    if let Some(secret) = state.config.slack_signing_secret.as_deref()
        && let Err(response) = verify_signature(&body, &headers, secret)
    {
        return response;
    }

    let Ok(json_body) = serde_json::from_str::<Value>(&body) else {
        warn!("Events payload is not JSON; acknowledging without processing");
        return helpers::ok_empty();
    };

    match accept_event(&state, &json_body) {
        EventAck::Challenge(challenge) => helpers::challenge_response(&challenge),
        EventAck::Accepted(_) | EventAck::Ignored => helpers::ok_empty(),
    }
}

fn verify_signature(body: &str, headers: &HeaderMap, secret: &str) -> Result<(), Response> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, secret) {
        return Err(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Invalid Slack signature",
        ));
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct OAuthQuery {
    code: Option<String>,
}

async fn oauth_redirect(State(state): State<AppState>, Query(query): Query<OAuthQuery>) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return helpers::plain_text(StatusCode::BAD_REQUEST, "missing code");
    };

    match exchange_code(&state.config, &state.http, &code).await {
        Ok(OAuthExchange::Authorized { .. }) => {
            helpers::plain_text(StatusCode::OK, "Authorization successful!")
        }
        Ok(OAuthExchange::Rejected(err)) => {
            info!(error = %err, "OAuth exchange rejected by Slack");
            helpers::plain_text(StatusCode::OK, &format!("Error: {err}"))
        }
        Err(RelayError::ConfigError(msg)) => {
            error!("OAuth configuration error: {}", msg);
            helpers::plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "OAuth configuration error: CLIENT_ID, CLIENT_SECRET and REDIRECT_URI must be set.",
            )
        }
        Err(e) => {
            error!("OAuth error: {}", e);
            helpers::plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
