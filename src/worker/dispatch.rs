//! Fanout of one inbound message to the channels it mentions.
//!
//! Segments are handled strictly one after another so that posts land in
//! mention order and diagnostics to the origin channel never interleave.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::summarize::Summarizer;
use crate::ai::{CompletionService, LlmClient};
use crate::core::config::AppConfig;
use crate::core::models::{ChannelReference, DeliveryOutcome, InboundMessage, Segment, SummaryStyle};
use crate::errors::RelayError;
use crate::slack::response_builder::{
    SUMMARY_MARKER, UNKNOWN_USER, channel_label, format_channel_summary,
    format_delivery_apology, format_not_member_notice, format_short_summary,
};
use crate::slack::{ChannelDirectory, MessagingPlatform, ScanResult, SlackClient, scan};

/// Why a message is ignored before any outbound call, if it is.
#[must_use]
pub fn rejection_reason(message: &InboundMessage, bot_user_id: &str) -> Option<&'static str> {
    if message.is_bot_generated {
        Some("bot generated")
    } else if message.is_self_authored
        || (!bot_user_id.is_empty() && message.author_user_id == bot_user_id)
    {
        Some("self authored")
    } else if message.raw_text.trim().is_empty() {
        Some("empty text")
    } else if message.raw_text.starts_with(SUMMARY_MARKER) {
        Some("already summarized")
    } else {
        None
    }
}

/// Orchestrates scanning, summarizing, channel resolution and posting.
pub struct FanoutDispatcher {
    platform: Arc<dyn MessagingPlatform>,
    completion: Arc<dyn CompletionService>,
}

impl FanoutDispatcher {
    #[must_use]
    pub fn new(platform: Arc<dyn MessagingPlatform>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            platform,
            completion,
        }
    }

    /// Wires the Slack and `OpenAI` clients from configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let platform = SlackClient::new(config.slack_bot_token.clone());
        let completion = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        );
        Self::new(Arc::new(platform), Arc::new(completion))
    }

    #[must_use]
    pub fn platform(&self) -> &dyn MessagingPlatform {
        self.platform.as_ref()
    }

    /// Processes one message and reports what happened to each target.
    ///
    /// Never fails: every error is logged and, where there is a target
    /// channel, turned into a notice posted to the origin channel.
    pub async fn dispatch(&self, message: &InboundMessage, bot_user_id: &str) -> Vec<DeliveryOutcome> {
        if let Some(reason) = rejection_reason(message, bot_user_id) {
            debug!(channel = %message.origin_channel_id, reason, "Ignoring message");
            return Vec::new();
        }

        let scanned = scan(&message.raw_text, bot_user_id);

        let outcomes: Vec<DeliveryOutcome> = if scanned.is_unrouted() {
            self.dispatch_short(message, &scanned).await.into_iter().collect()
        } else {
            self.dispatch_fanout(message, &scanned).await
        };

        for outcome in &outcomes {
            log_outcome(&message.origin_channel_id, outcome);
        }
        outcomes
    }

    async fn dispatch_short(
        &self,
        message: &InboundMessage,
        scanned: &ScanResult,
    ) -> Option<DeliveryOutcome> {
        let text = scanned.segments.first().map_or("", |s| s.text.as_str());
        if text.is_empty() {
            debug!(channel = %message.origin_channel_id, "Nothing left to summarize after cleaning");
            return None;
        }

        let origin = &message.origin_channel_id;
        let summary = match Summarizer::new(self.completion.as_ref())
            .summarize(text, SummaryStyle::Short)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                return Some(DeliveryOutcome::Failed {
                    channel_label: origin.clone(),
                    cause: e.to_string(),
                });
            }
        };

        let user_name = self.author_name(&message.author_user_id).await;
        let body = format_short_summary(scanned.bot_mentioned, &user_name, &summary.text);

        Some(match self.platform.post_message(origin, &body).await {
            Ok(()) => DeliveryOutcome::Delivered {
                channel: origin.clone(),
            },
            Err(e) => DeliveryOutcome::Failed {
                channel_label: origin.clone(),
                cause: e.to_string(),
            },
        })
    }

    async fn dispatch_fanout(
        &self,
        message: &InboundMessage,
        scanned: &ScanResult,
    ) -> Vec<DeliveryOutcome> {
        let mut outcomes = Vec::with_capacity(scanned.segments.len());
        if scanned.segments.is_empty() {
            info!(
                channel = %message.origin_channel_id,
                "Channel mentions carried no worklog text"
            );
            return outcomes;
        }

        let user_name = self.author_name(&message.author_user_id).await;
        let directory = ChannelDirectory::new(self.platform.as_ref());

        for segment in &scanned.segments {
            let Some(reference) = &segment.reference else {
                continue;
            };
            let outcome = self
                .deliver_segment(
                    message,
                    &directory,
                    reference,
                    segment,
                    &user_name,
                    scanned.bot_mentioned,
                )
                .await;
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn deliver_segment(
        &self,
        message: &InboundMessage,
        directory: &ChannelDirectory<'_>,
        reference: &ChannelReference,
        segment: &Segment,
        user_name: &str,
        bot_mentioned: bool,
    ) -> DeliveryOutcome {
        let origin = &message.origin_channel_id;
        let resolved = directory.resolve(&reference.token).await;
        let label = channel_label(
            resolved.as_ref().map(|c| c.resolved_name.as_str()),
            &reference.declared_label,
        );

        let summary = match Summarizer::new(self.completion.as_ref())
            .summarize(&segment.text, SummaryStyle::Bulleted)
            .await
        {
            Ok(summary) => summary,
            Err(e) => return self.apologize(origin, label, &e).await,
        };

        let is_origin = reference.token == *origin
            || resolved.as_ref().is_some_and(|c| c.id == *origin);
        if is_origin {
            return DeliveryOutcome::SkippedSelfChannel;
        }

        match resolved {
            Some(info) if info.is_bot_member => {
                let body = format_channel_summary(bot_mentioned, user_name, &label, &summary.text);
                match self.platform.post_message(&info.id, &body).await {
                    Ok(()) => DeliveryOutcome::Delivered { channel: info.id },
                    Err(e) => self.apologize(origin, label, &e).await,
                }
            }
            _ => match self
                .platform
                .post_message(origin, &format_not_member_notice(&label))
                .await
            {
                Ok(()) => DeliveryOutcome::SkippedNotMember {
                    channel_label: label,
                },
                Err(e) => self.apologize(origin, label, &e).await,
            },
        }
    }

    async fn apologize(&self, origin: &str, label: String, cause: &RelayError) -> DeliveryOutcome {
        if let Err(e) = self
            .platform
            .post_message(origin, &format_delivery_apology(&label))
            .await
        {
            error!(channel = %origin, target = %label, "Failed to post apology: {}", e);
        }
        DeliveryOutcome::Failed {
            channel_label: label,
            cause: cause.to_string(),
        }
    }

    async fn author_name(&self, user_id: &str) -> String {
        if user_id.is_empty() {
            return UNKNOWN_USER.to_string();
        }
        match self.platform.get_user_name(user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(user = %user_id, "User lookup failed: {}", e);
                UNKNOWN_USER.to_string()
            }
        }
    }
}

fn log_outcome(origin: &str, outcome: &DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Delivered { channel } => {
            info!(origin = %origin, target = %channel, "Summary delivered");
        }
        DeliveryOutcome::SkippedSelfChannel => {
            info!(origin = %origin, "Skipping repost to same channel");
        }
        DeliveryOutcome::SkippedNotMember { channel_label } => {
            info!(origin = %origin, target = %channel_label, "Not a member, asked to be invited");
        }
        DeliveryOutcome::Failed {
            channel_label,
            cause,
        } => {
            error!(origin = %origin, target = %channel_label, "Error sending summary: {}", cause);
        }
    }
}
