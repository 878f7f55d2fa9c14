//! Request types for chat models.

use crate::message::Message;
use crate::tools::ToolDefinition;

/// A request to a chat model containing messages and configuration.
///
/// ```rust,ignore
/// let request = ChatRequest::new(vec![
///     Message::system("You are an F1 assistant"),
///     Message::human("Who won in Monaco?"),
/// ])
/// .with_temperature(0.1)
/// .with_max_tokens(2048);
/// ```
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Generation parameters.
    pub config: ChatConfig,
}

impl ChatRequest {
    /// Create a new chat request with default configuration.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            config: ChatConfig::default(),
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of output tokens.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// Offer functions the model may call.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.config.tools = tools;
        self
    }
}

/// Generation parameters. Unset values fall back to the model's defaults.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub tools: Vec<ToolDefinition>,
}
