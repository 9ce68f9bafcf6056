use axum::http::HeaderMap;
use serde_json::Value;

use crate::core::models::{MessageEvent, PLAIN_MESSAGE_SUBTYPES};

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn v_array<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    v_path(root, path).and_then(|v| v.as_array())
}

pub fn get_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Top-level `type` of an Events API body (`url_verification`, `event_callback`, ...).
pub fn body_type(body: &Value) -> &str {
    v_str(body, &["type"]).unwrap_or("")
}

/// Extracts a plain `message` event from an `event_callback` body.
///
/// Returns `None` for other event types and for subtypes that do not carry a
/// user's own text (edits, deletions, joins). `bot_message` is kept so the
/// dispatcher can reject it explicitly.
pub fn parse_message_event(body: &Value) -> Option<MessageEvent> {
    let event = body.get("event")?;
    if v_str(event, &["type"]) != Some("message") {
        return None;
    }

    let subtype = v_str(event, &["subtype"]).map(ToString::to_string);
    if let Some(st) = subtype.as_deref()
        && st != "bot_message"
        && !PLAIN_MESSAGE_SUBTYPES.contains(&st)
    {
        return None;
    }

    let authorized_user_id = v_array(body, &["authorizations"])
        .and_then(|auths| auths.first())
        .and_then(|auth| v_str(auth, &["user_id"]))
        .map(ToString::to_string);

    Some(MessageEvent {
        channel: v_str(event, &["channel"]).unwrap_or_default().to_string(),
        user: v_str(event, &["user"]).unwrap_or_default().to_string(),
        text: v_str(event, &["text"]).unwrap_or_default().to_string(),
        subtype,
        bot_id: v_str(event, &["bot_id"]).map(ToString::to_string),
        authorized_user_id,
    })
}
