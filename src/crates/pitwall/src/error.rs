//! Error types for the pitwall agent.

use f1_data::ProviderError;
use llm::LlmError;
use thiserror::Error;
use tooling::ToolingError;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors raised while building an agent or executing one of its functions.
///
/// Query-time model failures never surface as `AgentError`; they are
/// classified into a reply instead.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model credential is not configured
    #[error("{0} environment variable not set")]
    MissingCredential(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required function argument was not supplied
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    /// A function argument could not be coerced to the expected type
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Model client construction failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Data provider failure
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<ToolingError> for AgentError {
    fn from(err: ToolingError) -> Self {
        AgentError::Config(err.to_string())
    }
}
