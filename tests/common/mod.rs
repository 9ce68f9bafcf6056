#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use standup::ai::CompletionService;
use standup::core::models::{ChannelInfo, InboundMessage};
use standup::errors::RelayError;
use standup::slack::MessagingPlatform;
use standup::worker::FanoutDispatcher;

pub const BOT_ID: &str = "UBOT";
pub const ORIGIN: &str = "CORIGIN";
pub const AUTHOR: &str = "UAUTHOR";

/// In-memory stand-in for Slack that records every post.
#[derive(Default)]
pub struct FakePlatform {
    channels: HashMap<String, ChannelInfo>,
    failing_posts: HashSet<String>,
    user_name: Option<String>,
    pub posts: Mutex<Vec<(String, String)>>,
    pub channel_lookups: Mutex<Vec<String>>,
    pub user_lookups: Mutex<usize>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            user_name: Some("Ada Lovelace".to_string()),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, id: &str, name: &str, is_member: bool) -> Self {
        self.channels.insert(
            id.to_string(),
            ChannelInfo {
                id: id.to_string(),
                resolved_name: name.to_string(),
                is_bot_member: is_member,
            },
        );
        self
    }

    pub fn failing_posts_to(mut self, channel: &str) -> Self {
        self.failing_posts.insert(channel.to_string());
        self
    }

    pub fn without_user_name(mut self) -> Self {
        self.user_name = None;
        self
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn channel_lookups(&self) -> Vec<String> {
        self.channel_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingPlatform for FakePlatform {
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), RelayError> {
        if self.failing_posts.contains(channel_id) {
            return Err(RelayError::DeliveryError(format!(
                "channel_not_found: {channel_id}"
            )));
        }
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn get_channel_info(&self, channel_id: &str) -> Result<ChannelInfo, RelayError> {
        self.channel_lookups
            .lock()
            .unwrap()
            .push(channel_id.to_string());
        self.channels
            .get(channel_id)
            .cloned()
            .ok_or_else(|| RelayError::ApiError("channel_not_found".to_string()))
    }

    async fn get_user_name(&self, _user_id: &str) -> Result<String, RelayError> {
        *self.user_lookups.lock().unwrap() += 1;
        self.user_name
            .clone()
            .ok_or_else(|| RelayError::ApiError("user_not_found".to_string()))
    }

    async fn get_bot_user_id(&self) -> Result<String, RelayError> {
        Ok(BOT_ID.to_string())
    }
}

/// Completion service that answers with a canned reply and records prompts.
pub struct FakeCompletion {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(cause: &str) -> Self {
        Self {
            reply: Err(cause.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn create_completion(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instruction.to_string(), user_text.to_string()));
        self.reply
            .clone()
            .map_err(RelayError::UpstreamError)
    }
}

pub fn dispatcher(
    platform: &Arc<FakePlatform>,
    completion: &Arc<FakeCompletion>,
) -> FanoutDispatcher {
    FanoutDispatcher::new(platform.clone(), completion.clone())
}

pub fn message(text: &str) -> InboundMessage {
    InboundMessage {
        origin_channel_id: ORIGIN.to_string(),
        author_user_id: AUTHOR.to_string(),
        raw_text: text.to_string(),
        is_self_authored: false,
        is_bot_generated: false,
    }
}
