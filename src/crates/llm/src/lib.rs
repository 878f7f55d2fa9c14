//! Chat model abstraction and remote provider implementations.
//!
//! The [`ChatModel`] trait is the seam between an agent and the model that
//! drives it. Requests carry messages plus generation parameters and may
//! offer [`ToolDefinition`]s for native function calling.
//!
//! # Remote Provider (Google Gemini)
//!
//! ```rust,ignore
//! use llm::remote::{GeminiClient, GEMINI_BASE_URL};
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env(
//!         "GEMINI_API_KEY",
//!         GEMINI_BASE_URL,
//!         "gemini-2.5-flash-lite",
//!     )?;
//!     let client = GeminiClient::new(config)?;
//!
//!     let request = ChatRequest::new(vec![
//!         Message::human("Which circuit hosts the Monaco Grand Prix?")
//!     ]).with_temperature(0.1);
//!
//!     let response = client.chat(request).await?;
//!     println!("Response: {}", response.text());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod remote;
pub mod request;
pub mod response;
pub mod tools;
pub mod traits;

// Re-export commonly used types
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use message::{Message, MessageRole};
pub use request::{ChatConfig, ChatRequest};
pub use response::{ChatResponse, UsageMetadata};
pub use tools::{ToolCall, ToolDefinition};
pub use traits::ChatModel;
