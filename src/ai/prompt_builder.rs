use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

use crate::core::models::SummaryStyle;

/// Instruction for messages that mention no channel.
pub const SHORT_INSTRUCTION: &str =
    "You are a helpful assistant that summarizes worklogs into 3–4 lines.";

/// Instruction for each per-channel segment.
pub const BULLETED_INSTRUCTION: &str =
    "Summarize developer worklog into 6–7 clear bullet points.";

/// Worklog text beyond this many characters is cut before it reaches the model.
pub const MAX_WORKLOG_CHARS: usize = 12_000;

#[must_use]
pub fn instruction_for(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Short => SHORT_INSTRUCTION,
        SummaryStyle::Bulleted => BULLETED_INSTRUCTION,
    }
}

/// Drops control characters other than newlines and tabs, and hard-truncates.
#[must_use]
pub fn sanitize_worklog(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(MAX_WORKLOG_CHARS)
        .collect()
}

/// System framing followed by the worklog as the user turn.
#[must_use]
pub fn build_prompt(system_instruction: &str, user_text: &str) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(system_instruction.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(sanitize_worklog(user_text)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}
