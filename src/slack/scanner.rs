//! Channel-reference scanner.
//!
//! Splits raw Slack message text into per-channel segments. A channel mention
//! looks like `<#C123|eng>` or a bare `<#C123>`; the text belonging to a mention
//! runs from the end of that mention to the start of the next one.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

use crate::core::models::{ChannelReference, Segment};

static CHANNEL_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<#(\w+)(?:\|([^>]*))?>").expect("static regex compile"));

static ANY_CHANNEL_MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<#[^>]*>").expect("static regex compile"));

static USER_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<@(\w+)(?:\|[^>]*)?>").expect("static regex compile"));

/// Output of [`scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The bot's own user id appeared as a mention somewhere in the text.
    pub bot_mentioned: bool,
    /// Ordered left to right. Exactly one unreferenced segment when the text
    /// has no channel mentions; otherwise only referenced, non-empty segments.
    pub segments: Vec<Segment>,
}

impl ScanResult {
    /// True when the text carried no channel mentions at all.
    #[must_use]
    pub fn is_unrouted(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment { reference: None, .. }])
    }
}

/// Scans `raw_text` for channel mentions and splits it into segments.
///
/// Mentions followed by no text (before the next mention or the end of the
/// message) are dropped. Text preceding the first mention belongs to no
/// channel and is not routed anywhere.
///
/// # Examples
///
/// ```
/// use standup::slack::scanner::scan;
///
/// let result = scan("<#C123|eng> fixed bug X <#C456> wrote docs", "UBOT");
/// assert_eq!(result.segments.len(), 2);
/// assert_eq!(result.segments[0].text, "fixed bug X");
/// assert_eq!(result.segments[1].reference.as_ref().unwrap().token, "C456");
/// ```
#[must_use]
pub fn scan(raw_text: &str, bot_user_id: &str) -> ScanResult {
    let bot_mentioned = mentions_user(raw_text, bot_user_id);
    let mentions = find_mentions(raw_text);

    if mentions.is_empty() {
        return ScanResult {
            bot_mentioned,
            segments: vec![Segment {
                reference: None,
                text: clean_text(raw_text, bot_user_id),
            }],
        };
    }

    let mut segments = Vec::with_capacity(mentions.len());
    for (idx, (span, reference)) in mentions.iter().enumerate() {
        let end = mentions
            .get(idx + 1)
            .map_or(raw_text.len(), |(next, _)| next.start);
        let text = clean_text(&raw_text[span.end..end], bot_user_id);
        if text.is_empty() {
            continue;
        }
        segments.push(Segment {
            reference: Some(reference.clone()),
            text,
        });
    }

    ScanResult {
        bot_mentioned,
        segments,
    }
}

/// Whether `<@user_id>` (optionally with a `|label`) appears in the text.
#[must_use]
pub fn mentions_user(raw_text: &str, user_id: &str) -> bool {
    if user_id.is_empty() {
        return false;
    }
    USER_MENTION_RE
        .captures_iter(raw_text)
        .any(|cap| &cap[1] == user_id)
}

fn find_mentions(raw_text: &str) -> Vec<(Range<usize>, ChannelReference)> {
    CHANNEL_MENTION_RE
        .captures_iter(raw_text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let token = cap.get(1)?.as_str().to_string();
            let declared_label = cap
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();
            Some((
                whole.range(),
                ChannelReference {
                    token,
                    declared_label,
                },
            ))
        })
        .collect()
}

/// Removes the bot's own mention markup and all channel markup, then trims.
fn clean_text(text: &str, bot_user_id: &str) -> String {
    let without_bot = USER_MENTION_RE.replace_all(text, |cap: &Captures<'_>| {
        if !bot_user_id.is_empty() && &cap[1] == bot_user_id {
            String::new()
        } else {
            cap[0].to_string()
        }
    });
    ANY_CHANNEL_MARKUP_RE
        .replace_all(&without_bot, "")
        .trim()
        .to_string()
}
