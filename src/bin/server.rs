use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

use standup::api::{AppState, oauth, router};
use standup::core::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    standup::setup_logging();

    let config = Arc::new(AppConfig::from_env()?);

    if let Some(url) = oauth::build_authorize_url(&config, &Uuid::new_v4().to_string()) {
        info!(oauth_url = %url, "OAuth install URL");
    }

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Slack bot server running");

    let app = router(AppState::from_config(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
