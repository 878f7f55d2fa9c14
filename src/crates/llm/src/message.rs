//! Conversation messages exchanged with a chat model.

use crate::tools::ToolCall;
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Instructions that frame the whole conversation.
    System,
    /// The end user.
    Human,
    /// The model.
    Assistant,
    /// The output of a function the model asked for.
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,

    /// Function name for `Tool` messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Structured calls requested by an `Assistant` message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            tool_calls: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Human, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }

    /// A function result fed back to the model.
    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        let mut message = Self::with_role(MessageRole::Tool, content);
        message.name = Some(name.into());
        message
    }

    /// Attach structured calls to an assistant message.
    pub fn with_tool_calls(mut self, calls: Vec<ToolCall>) -> Self {
        self.tool_calls = if calls.is_empty() { None } else { Some(calls) };
        self
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().map_or(false, |calls| !calls.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        assert_eq!(Message::system("s").role, MessageRole::System);
        assert_eq!(Message::human("h").text(), "h");

        let tool = Message::tool("get_sessions", "Found 1 sessions: []");
        assert_eq!(tool.role, MessageRole::Tool);
        assert_eq!(tool.name.as_deref(), Some("get_sessions"));
    }

    #[test]
    fn test_tool_calls() {
        let plain = Message::assistant("hello");
        assert!(!plain.has_tool_calls());

        let calling = Message::assistant("")
            .with_tool_calls(vec![ToolCall::new("call_0", "get_drivers", json!({}))]);
        assert!(calling.has_tool_calls());

        let emptied = Message::assistant("").with_tool_calls(Vec::new());
        assert!(emptied.tool_calls.is_none());
    }
}
