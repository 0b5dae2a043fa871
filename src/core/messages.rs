//! Messages emitted by the agent CLI in stream-json mode
//!
//! One JSON object per line, discriminated by `type` and an optional
//! `subtype`. Shapes this crate does not know about are kept as
//! `Other` rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum SdkMessage {
    System(SystemMessage),
    Assistant(AssistantMessage),
    User(UserMessage),
    Result(ResultMessage),
    Other {
        kind: String,
        subtype: Option<String>,
    },
}

impl SdkMessage {
    /// The `type` discriminator as it appeared on the wire.
    pub fn kind(&self) -> &str {
        match self {
            Self::System(_) => "system",
            Self::Assistant(_) => "assistant",
            Self::User(_) => "user",
            Self::Result(_) => "result",
            Self::Other { kind, .. } => kind,
        }
    }

    pub fn subtype(&self) -> Option<&str> {
        match self {
            Self::System(m) => m.subtype.as_deref(),
            Self::Result(m) => Some(m.subtype.as_str()),
            Self::Other { subtype, .. } => subtype.as_deref(),
            Self::Assistant(_) | Self::User(_) => None,
        }
    }

    pub fn as_result(&self) -> Option<&ResultMessage> {
        match self {
            Self::Result(result) => Some(result),
            _ => None,
        }
    }
}

impl TryFrom<Value> for SdkMessage {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("type"))?;

        match kind.as_str() {
            "system" => serde_json::from_value(value).map(Self::System),
            "assistant" => serde_json::from_value(value).map(Self::Assistant),
            "user" => serde_json::from_value(value).map(Self::User),
            "result" => serde_json::from_value(value).map(Self::Result),
            _ => Ok(Self::Other {
                subtype: value
                    .get("subtype")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                kind,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemMessage {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub plugins: Vec<PluginInfo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantMessage {
    pub message: AssistantBody,
    #[serde(default)]
    pub parent_tool_use_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantBody {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserMessage {
    pub message: UserBody,
    #[serde(default)]
    pub parent_tool_use_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserBody {
    pub content: UserContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: Option<Value>,
        is_error: bool,
    },
    Thinking {
        thinking: String,
    },
    Other {
        kind: String,
    },
}

impl ContentBlock {
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::ToolUse { .. } => "tool_use",
            Self::ToolResult { .. } => "tool_result",
            Self::Thinking { .. } => "thinking",
            Self::Other { kind } => kind,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Option<Value>,
        #[serde(default)]
        is_error: Option<bool>,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
}

impl TryFrom<Value> for ContentBlock {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("type"))?;

        if !matches!(
            kind.as_str(),
            "text" | "tool_use" | "tool_result" | "thinking"
        ) {
            return Ok(Self::Other { kind });
        }

        Ok(match serde_json::from_value::<KnownBlock>(value)? {
            KnownBlock::Text { text } => Self::Text { text },
            KnownBlock::ToolUse { id, name, input } => Self::ToolUse { id, name, input },
            KnownBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Self::ToolResult {
                tool_use_id,
                content,
                is_error: is_error.unwrap_or(false),
            },
            KnownBlock::Thinking { thinking } => Self::Thinking { thinking },
        })
    }
}

/// Final message of a run: success or one of the error subtypes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultMessage {
    pub subtype: String,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub duration_api_ms: u64,
    #[serde(default)]
    pub num_turns: u32,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub total_cost_usd: f64,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl ResultMessage {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SdkMessage {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_system_init() {
        let msg = parse(
            r#"{"type":"system","subtype":"init","session_id":"abc","model":"claude-haiku",
                "tools":["WebSearch","Bash"],"plugins":[{"name":"research","path":"/p"}],
                "cwd":"/tmp","apiKeySource":"none"}"#,
        );

        let SdkMessage::System(system) = &msg else {
            panic!("expected system message, got {:?}", msg);
        };
        assert_eq!(msg.subtype(), Some("init"));
        assert_eq!(system.session_id.as_deref(), Some("abc"));
        assert_eq!(system.tools, vec!["WebSearch", "Bash"]);
        assert_eq!(system.plugins[0].name, "research");
    }

    #[test]
    fn test_assistant_blocks() {
        let msg = parse(
            r#"{"type":"assistant","message":{"id":"m1","content":[
                {"type":"text","text":"Looking up AAPL"},
                {"type":"tool_use","id":"t1","name":"WebSearch","input":{"query":"AAPL"}},
                {"type":"server_tool_use","id":"t2"}
            ]},"parent_tool_use_id":null,"session_id":"abc"}"#,
        );

        let SdkMessage::Assistant(assistant) = msg else {
            panic!("expected assistant message");
        };
        let kinds: Vec<_> = assistant.message.content.iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, vec!["text", "tool_use", "server_tool_use"]);
    }

    #[test]
    fn test_user_string_and_blocks() {
        let msg = parse(r#"{"type":"user","message":{"role":"user","content":"plain"}}"#);
        let SdkMessage::User(user) = msg else {
            panic!("expected user message");
        };
        assert_eq!(user.message.content, UserContent::Text("plain".to_string()));

        let msg = parse(
            r#"{"type":"user","message":{"role":"user","content":[
                {"type":"tool_result","tool_use_id":"t1","content":"ok"}
            ]}}"#,
        );
        let SdkMessage::User(user) = msg else {
            panic!("expected user message");
        };
        match &user.message.content {
            UserContent::Blocks(blocks) => match &blocks[0] {
                ContentBlock::ToolResult {
                    tool_use_id,
                    is_error,
                    ..
                } => {
                    assert_eq!(tool_use_id, "t1");
                    assert!(!is_error);
                }
                other => panic!("unexpected block {:?}", other),
            },
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_result_success_and_error() {
        let ok = parse(
            r#"{"type":"result","subtype":"success","is_error":false,"duration_ms":12345,
                "num_turns":4,"total_cost_usd":0.0123,"result":"done",
                "usage":{"input_tokens":100,"output_tokens":50}}"#,
        );
        let result = ok.as_result().unwrap();
        assert!(!result.is_error);
        assert_eq!(result.result.as_deref(), Some("done"));
        assert_eq!(result.usage.output_tokens, 50);
        assert!((result.duration_secs() - 12.345).abs() < f64::EPSILON);

        let failed = parse(
            r#"{"type":"result","subtype":"error_max_turns","is_error":true,"duration_ms":1,
                "num_turns":10,"total_cost_usd":0.5,"usage":{"input_tokens":1,"output_tokens":2},
                "errors":["max turns reached"]}"#,
        );
        let result = failed.as_result().unwrap();
        assert!(result.is_error);
        assert_eq!(result.errors.as_ref().unwrap().len(), 1);
        assert!(result.result.is_none());
    }

    #[test]
    fn test_unknown_type_kept() {
        let msg = parse(r#"{"type":"stream_event","subtype":"delta","event":{}}"#);
        assert_eq!(msg.kind(), "stream_event");
        assert_eq!(msg.subtype(), Some("delta"));

        let msg = parse(r#"{"type":"tool_progress"}"#);
        assert_eq!(msg.subtype(), None);
    }

    #[test]
    fn test_system_without_subtype() {
        let msg = parse(r#"{"type":"system","session_id":"abc"}"#);
        assert_eq!(msg.kind(), "system");
        assert_eq!(msg.subtype(), None);
    }

    #[test]
    fn test_missing_type_rejected() {
        assert!(serde_json::from_str::<SdkMessage>(r#"{"subtype":"init"}"#).is_err());
    }
}
