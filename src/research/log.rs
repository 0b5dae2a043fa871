//! One-line progress descriptions of stream messages

use crate::core::messages::{ContentBlock, SdkMessage, UserContent};

const ASSISTANT_TEXT_CHARS: usize = 80;
const USER_STRING_CHARS: usize = 100;
const USER_TEXT_CHARS: usize = 60;

/// `[type]` or `[type:subtype]`.
pub fn prefix(message: &SdkMessage) -> String {
    match message.subtype() {
        Some(subtype) => format!("[{}:{}]", message.kind(), subtype),
        None => format!("[{}]", message.kind()),
    }
}

/// Progress lines for `message`. Result messages produce none; the summary covers them.
pub fn describe(message: &SdkMessage) -> Vec<String> {
    let prefix = prefix(message);

    match message {
        SdkMessage::System(system) if system.subtype.as_deref() == Some("init") => {
            let mut lines = vec![format!(
                "{} session={} model={} tools={}",
                prefix,
                system.session_id.as_deref().unwrap_or(""),
                system.model.as_deref().unwrap_or(""),
                system.tools.join(",")
            )];
            if !system.plugins.is_empty() {
                let names: Vec<_> = system.plugins.iter().map(|p| p.name.as_str()).collect();
                lines.push(format!("{} plugins={}", prefix, names.join(",")));
            }
            lines
        }
        SdkMessage::Assistant(assistant) => {
            let blocks: Vec<_> = assistant
                .message
                .content
                .iter()
                .map(describe_assistant_block)
                .collect();
            vec![format!("{} {}", prefix, blocks.join(", "))]
        }
        SdkMessage::User(user) => match &user.message.content {
            UserContent::Text(text) => {
                vec![format!("{} {}", prefix, truncate(text, USER_STRING_CHARS))]
            }
            UserContent::Blocks(blocks) => {
                let blocks: Vec<_> = blocks.iter().map(describe_user_block).collect();
                vec![format!("{} {}", prefix, blocks.join(", "))]
            }
        },
        SdkMessage::Result(_) => Vec::new(),
        _ => vec![prefix],
    }
}

fn describe_assistant_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text { text } => {
            format!("text({}...)", truncate(text, ASSISTANT_TEXT_CHARS))
        }
        ContentBlock::ToolUse { name, input, .. } if name == "Task" => {
            let target = input
                .get("subagent_type")
                .and_then(|v| v.as_str())
                .or_else(|| input.get("name").and_then(|v| v.as_str()))
                .unwrap_or("unknown");
            format!("Task({})", target)
        }
        ContentBlock::ToolUse { name, .. } => format!("tool_use({})", name),
        other => other.kind().to_string(),
    }
}

fn describe_user_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::ToolResult { tool_use_id, .. } => format!("tool_result({})", tool_use_id),
        ContentBlock::Text { text } => format!("text({})", truncate(text, USER_TEXT_CHARS)),
        other => other.kind().to_string(),
    }
}

/// First `max` characters of `text`.
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
