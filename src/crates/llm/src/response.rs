//! Response types returned by chat models.

use crate::message::Message;
use crate::tools::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A complete response from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant message, possibly carrying tool calls.
    pub message: Message,

    /// Token accounting when the provider reports it.
    pub usage: Option<UsageMetadata>,

    /// Provider-specific extras (finish reason, block reason, ...).
    pub metadata: HashMap<String, JsonValue>,
}

impl ChatResponse {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_usage(mut self, usage: UsageMetadata) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The response text. Empty when the model produced none.
    pub fn text(&self) -> &str {
        self.message.text()
    }

    /// Structured calls requested by the model.
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.message.tool_calls.as_deref().unwrap_or(&[])
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.metadata.get("finish_reason").and_then(JsonValue::as_str)
    }

    /// Why the provider refused the prompt, when it did.
    pub fn block_reason(&self) -> Option<&str> {
        self.metadata.get("block_reason").and_then(JsonValue::as_str)
    }
}

/// Token usage for one model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

impl UsageMetadata {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}
