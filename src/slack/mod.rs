//! All Slack-specific functionality

pub mod client;
pub mod directory;
pub mod response_builder;
pub mod scanner;

use async_trait::async_trait;

use crate::core::models::ChannelInfo;
use crate::errors::RelayError;

// Re-export main types for convenience
pub use client::SlackClient;
pub use directory::ChannelDirectory;
pub use scanner::{ScanResult, scan};

/// The messaging-platform operations the relay depends on.
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// # Errors
    ///
    /// Returns `RelayError::DeliveryError` when the post is rejected or cannot be sent.
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), RelayError>;

    /// # Errors
    ///
    /// Returns an error when the lookup fails or the channel does not exist.
    async fn get_channel_info(&self, channel_id: &str) -> Result<ChannelInfo, RelayError>;

    /// # Errors
    ///
    /// Returns an error when the user lookup fails.
    async fn get_user_name(&self, user_id: &str) -> Result<String, RelayError>;

    /// # Errors
    ///
    /// Returns an error when the token cannot be introspected.
    async fn get_bot_user_id(&self) -> Result<String, RelayError>;
}
