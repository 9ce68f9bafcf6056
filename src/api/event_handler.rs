//! Handler for Slack Events API payloads.
//!
//! Answers the `url_verification` handshake and acknowledges every other
//! payload at once; message processing runs on a detached task.

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::handler::AppState;
use super::parsing::{body_type, parse_message_event, v_str};
use crate::core::models::DeliveryOutcome;
use crate::worker::spawn_event;

/// What the transport should be told about an accepted payload.
#[derive(Debug)]
pub enum EventAck {
    /// Verification handshake; echo this challenge.
    Challenge(String),
    /// A message event is being processed in the background.
    Accepted(JoinHandle<Vec<DeliveryOutcome>>),
    /// Nothing to do.
    Ignored,
}

/// Classifies an Events API body and starts processing when it is a message.
pub fn accept_event(state: &AppState, body: &Value) -> EventAck {
    match body_type(body) {
        "url_verification" => {
            EventAck::Challenge(v_str(body, &["challenge"]).unwrap_or_default().to_string())
        }
        "event_callback" => match parse_message_event(body) {
            Some(event) => {
                info!(channel = %event.channel, "Accepted message event");
                EventAck::Accepted(spawn_event(state.dispatcher.clone(), event))
            }
            None => {
                debug!(
                    event_type = v_str(body, &["event", "type"]).unwrap_or(""),
                    "Ignoring non-message event"
                );
                EventAck::Ignored
            }
        },
        other => {
            debug!(body_type = %other, "Ignoring payload");
            EventAck::Ignored
        }
    }
}
