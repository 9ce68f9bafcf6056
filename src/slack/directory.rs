use tracing::warn;

use super::MessagingPlatform;
use crate::core::models::ChannelInfo;

/// Resolves channel tokens to live channel metadata.
///
/// Lookups are not cached.
pub struct ChannelDirectory<'a> {
    platform: &'a dyn MessagingPlatform,
}

impl<'a> ChannelDirectory<'a> {
    #[must_use]
    pub fn new(platform: &'a dyn MessagingPlatform) -> Self {
        Self { platform }
    }

    /// Returns `None` when the lookup fails or the channel is unknown.
    pub async fn resolve(&self, channel_token: &str) -> Option<ChannelInfo> {
        match self.platform.get_channel_info(channel_token).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(channel = %channel_token, "Channel lookup failed: {}", e);
                None
            }
        }
    }
}
