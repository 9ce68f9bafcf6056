use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::dispatch::FanoutDispatcher;
use crate::core::models::{DeliveryOutcome, MessageEvent};

/// Runs one message event to completion.
///
/// Falls back to `auth.test` for the bot's user id when the envelope carried no
/// `authorizations` entry.
pub async fn process_event(
    dispatcher: Arc<FanoutDispatcher>,
    event: MessageEvent,
) -> Vec<DeliveryOutcome> {
    let bot_user_id = match event.authorized_user_id.clone() {
        Some(id) if !id.is_empty() => id,
        _ => match dispatcher.platform().get_bot_user_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not determine bot user id: {}", e);
                String::new()
            }
        },
    };

    let message = event.into_inbound(&bot_user_id);
    let outcomes = dispatcher.dispatch(&message, &bot_user_id).await;

    if !outcomes.is_empty() {
        info!(
            channel = %message.origin_channel_id,
            outcomes = outcomes.len(),
            "Finished processing message"
        );
    }
    outcomes
}

/// Detaches processing from the request so the transport can be acknowledged first.
pub fn spawn_event(
    dispatcher: Arc<FanoutDispatcher>,
    event: MessageEvent,
) -> JoinHandle<Vec<DeliveryOutcome>> {
    tokio::spawn(process_event(dispatcher, event))
}
