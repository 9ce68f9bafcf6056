//! Slack API client module
//!
//! Encapsulates all Slack API interactions with retry logic and error handling.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{SlackApiChatPostMessageRequest, SlackApiUsersInfoRequest};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackUserId,
};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, RetryIf, strategy::ExponentialBackoff};
use tracing::{debug, warn};

use super::MessagingPlatform;
use crate::core::models::ChannelInfo;
use crate::errors::RelayError;

const SLACK_API_BASE: &str = "https://slack.com/api";

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a RelayError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Deserialize)]
struct ConversationsInfoResponse {
    ok: bool,
    channel: Option<ConversationsInfoChannel>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationsInfoChannel {
    id: String,
    name: Option<String>,
    #[serde(default)]
    is_member: bool,
}

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, RelayError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, RelayError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(3);

        Retry::spawn(strategy, operation).await
    }

    /// Like `with_retry`, but gives up at once on errors that are not transient.
    async fn with_transient_retry<F, Fut, T>(&self, operation: F) -> Result<T, RelayError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, RelayError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(3);

        RetryIf::spawn(strategy, operation, RelayError::is_transient).await
    }

    fn connector() -> Result<&'static SlackHyperClient, RelayError> {
        SLACK_CLIENT.as_ref().ok_or_else(|| {
            RelayError::ApiError("Slack HTTP connector not initialized".to_string())
        })
    }
}

#[async_trait]
impl MessagingPlatform for SlackClient {
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), RelayError> {
        self.with_retry(|| async {
            let session = Self::connector()
                .map_err(RelayError::into_delivery)?
                .open_session(&self.token);

            let post_req = SlackApiChatPostMessageRequest::new(
                SlackChannelId(channel_id.to_string()),
                SlackMessageContent::new().with_text(text.to_string()),
            );

            session
                .chat_post_message(&post_req)
                .await
                .map_err(|e| RelayError::DeliveryError(format!("chat.postMessage: {}", e)))?;

            Ok(())
        })
        .await
    }

    async fn get_channel_info(&self, channel_id: &str) -> Result<ChannelInfo, RelayError> {
        self.with_transient_retry(|| async {
            let resp = HTTP_CLIENT
                .post(format!("{SLACK_API_BASE}/conversations.info"))
                .bearer_auth(&self.token.token_value.0)
                .form(&[("channel", channel_id)])
                .send()
                .await?;

            let info: ConversationsInfoResponse = resp.json().await.map_err(|e| {
                RelayError::ApiError(format!("Failed to parse channel info: {}", e))
            })?;

            if !info.ok {
                return Err(RelayError::ApiError(format!(
                    "conversations.info failed: {}",
                    info.error.unwrap_or_else(|| "unknown".to_string())
                )));
            }

            let channel = info.channel.ok_or_else(|| {
                RelayError::ApiError("conversations.info returned no channel".to_string())
            })?;

            debug!(channel_id = %channel.id, is_member = channel.is_member, "Resolved channel");

            Ok(ChannelInfo {
                resolved_name: channel.name.unwrap_or_default(),
                id: channel.id,
                is_bot_member: channel.is_member,
            })
        })
        .await
    }

    async fn get_user_name(&self, user_id: &str) -> Result<String, RelayError> {
        self.with_retry(|| async {
            let session = Self::connector()?.open_session(&self.token);
            let user_info_req = SlackApiUsersInfoRequest::new(SlackUserId(user_id.to_string()));

            let info = session.users_info(&user_info_req).await?;
            let profile = info.user.profile.as_ref();
            let name = profile
                .and_then(|p| p.real_name.clone())
                .filter(|n| !n.trim().is_empty())
                .or_else(|| {
                    profile
                        .and_then(|p| p.display_name.clone())
                        .filter(|n| !n.trim().is_empty())
                })
                .unwrap_or_else(|| user_id.to_string());

            Ok(name)
        })
        .await
    }

    async fn get_bot_user_id(&self) -> Result<String, RelayError> {
        self.with_retry(|| async {
            let session = Self::connector()?.open_session(&self.token);

            let test_resp = session.auth_test().await?;

            Ok(test_resp.user_id.0)
        })
        .await
    }
}
