//! Text of every message the relay posts to Slack.
//!
//! The summary marker must stay byte-identical across all of these, since the
//! inbound guard skips any message that starts with it.

/// Leading token of every bot-authored summary.
pub const SUMMARY_MARKER: &str = "[SUMMARY]";

/// Full first line prepended to summaries when the bot was mentioned.
pub const SUMMARY_MARKER_LINE: &str = "[SUMMARY] This is work log summary\n";

pub const UNKNOWN_USER: &str = "Unknown User";

pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";

fn marker_prefix(bot_mentioned: bool) -> &'static str {
    if bot_mentioned { SUMMARY_MARKER_LINE } else { "" }
}

/// Summary posted back to the origin channel for a message with no channel mentions.
///
/// # Examples
///
/// ```
/// use standup::slack::response_builder::format_short_summary;
///
/// let text = format_short_summary(false, "Ada", "Refactored auth.");
/// assert_eq!(text, "User: Ada\nRefactored auth.");
/// ```
#[must_use]
pub fn format_short_summary(bot_mentioned: bool, user_name: &str, summary: &str) -> String {
    format!("{}User: {}\n{}", marker_prefix(bot_mentioned), user_name, summary)
}

/// Summary posted to a mentioned project channel.
#[must_use]
pub fn format_channel_summary(
    bot_mentioned: bool,
    user_name: &str,
    channel_label: &str,
    summary: &str,
) -> String {
    format!(
        "{}User: {}\nProject: #{}\n{}",
        marker_prefix(bot_mentioned),
        user_name,
        channel_label,
        summary
    )
}

#[must_use]
pub fn format_not_member_notice(channel_label: &str) -> String {
    format!("I'm not a member of #{channel_label}. Please invite me.")
}

#[must_use]
pub fn format_delivery_apology(channel_label: &str) -> String {
    format!("Couldn't send summary to #{channel_label}")
}

/// Picks the human-readable channel name: fresh name, then the declared label.
#[must_use]
pub fn channel_label(resolved_name: Option<&str>, declared_label: &str) -> String {
    resolved_name
        .filter(|n| !n.trim().is_empty())
        .or(Some(declared_label).filter(|l| !l.trim().is_empty()))
        .unwrap_or(UNKNOWN_CHANNEL)
        .to_string()
}
