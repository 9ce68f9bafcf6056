/// Standup - a Slack relay that summarizes worklog messages with `OpenAI`.
///
/// Every message posted in a channel the bot can read is condensed by a chat
/// completion model. Messages that mention other channels (`<#C123|eng>`) are
/// split at each mention and the per-project summaries are posted to those
/// channels instead.
///
/// # Architecture
///
/// - axum receives Events API callbacks and acknowledges them immediately
/// - a detached tokio task scans, summarizes and fans out each message
/// - slack-morphism and reqwest talk to Slack
/// - reqwest with openai-api-rs message types talks to the completion service
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use standup::api::{AppState, router};
/// use standup::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     standup::setup_logging();
///
///     let config = Arc::new(AppConfig {
///         slack_bot_token: "xoxb-dummy".to_string(),
///         slack_signing_secret: None,
///         slack_client_id: None,
///         slack_client_secret: None,
///         slack_redirect_url: None,
///         openai_api_key: "dummy_openai_key".to_string(),
///         openai_org_id: None,
///         openai_model: "gpt-3.5-turbo".to_string(),
///         openai_base_url: "https://api.openai.com/v1".to_string(),
///         port: 4000,
///     });
///
///     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
///     axum::serve(listener, router(AppState::from_config(config))).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod slack;
pub mod worker;

pub use ai::estimate_tokens;
pub use errors::RelayError;

/// Configure structured JSON logging.
///
/// Honors `RUST_LOG` and defaults to `info`. Calling it again once a global
/// subscriber is installed does nothing.
///
/// # Example
///
/// ```
/// standup::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
