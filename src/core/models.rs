use serde::{Deserialize, Serialize};

/// One plain message event, extracted from an `event_callback` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub origin_channel_id: String,
    pub author_user_id: String,
    pub raw_text: String,
    pub is_self_authored: bool,
    pub is_bot_generated: bool,
}

/// A `<#C123|label>` mention found in message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelReference {
    pub token: String,
    /// Label as embedded in the markup. Empty when the markup had none; may be stale.
    pub declared_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub reference: Option<ChannelReference>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: String,
    pub resolved_name: String,
    pub is_bot_member: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    /// Condensed 3-4 line summary for messages without channel references.
    Short,
    /// 6-7 bullet points for each per-channel segment.
    Bulleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { channel: String },
    SkippedSelfChannel,
    SkippedNotMember { channel_label: String },
    Failed { channel_label: String, cause: String },
}

/// Message subtypes that still carry a user's own text.
pub const PLAIN_MESSAGE_SUBTYPES: [&str; 2] = ["thread_broadcast", "file_share"];

/// Raw fields of a `message` event before the bot's own id is known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageEvent {
    pub channel: String,
    pub user: String,
    pub text: String,
    pub subtype: Option<String>,
    pub bot_id: Option<String>,
    /// `authorizations[0].user_id` from the envelope, i.e. the bot's user id.
    pub authorized_user_id: Option<String>,
}

impl MessageEvent {
    #[must_use]
    pub fn is_bot_generated(&self) -> bool {
        self.bot_id.is_some() || self.subtype.as_deref() == Some("bot_message")
    }

    /// Builds the immutable per-event message once the bot's user id is settled.
    #[must_use]
    pub fn into_inbound(self, bot_user_id: &str) -> InboundMessage {
        let is_bot_generated = self.is_bot_generated();
        InboundMessage {
            is_self_authored: !bot_user_id.is_empty() && self.user == bot_user_id,
            is_bot_generated,
            origin_channel_id: self.channel,
            author_user_id: self.user,
            raw_text: self.text,
        }
    }
}
