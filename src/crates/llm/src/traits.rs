//! The chat model abstraction.

use crate::error::Result;
use crate::request::ChatRequest;
use crate::response::ChatResponse;
use async_trait::async_trait;

/// A conversational model that turns a message list into one reply.
///
/// Implementations must be `Send + Sync`; share them as `Arc<dyn ChatModel>`.
///
/// Models that support function calling accept `ToolDefinition`s through
/// `ChatRequest::with_tools` and return requested calls in
/// `response.message.tool_calls`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete chat response from messages.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Check if the model/provider is reachable.
    ///
    /// Default implementation returns `Ok(true)`.
    async fn is_available(&self) -> Result<bool> {
        Ok(true)
    }

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use std::sync::Arc;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(ChatResponse::new(Message::assistant(last)))
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let model: Arc<dyn ChatModel> = Arc::new(EchoModel);
        let response = model
            .chat(ChatRequest::new(vec![Message::human("ping")]))
            .await
            .unwrap();
        assert_eq!(response.text(), "ping");
        assert_eq!(model.model_name(), "echo");
    }

    #[tokio::test]
    async fn test_default_is_available() {
        assert!(EchoModel.is_available().await.unwrap());
    }
}
