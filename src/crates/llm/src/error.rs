//! Failures of a chat model call.
//!
//! Variants follow the Gemini status codes so callers can react to the
//! cause without parsing messages.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure before any HTTP status was received.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// `UNAUTHENTICATED`, or a bad request naming the API key.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The key variable is unset or blank.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// `PERMISSION_DENIED`
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// `NOT_FOUND`
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// `UNAVAILABLE`
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// `RESOURCE_EXHAUSTED`: per-minute rate or daily quota.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// A 2xx body that does not decode as a `generateContent` response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client-side timeout or `DEADLINE_EXCEEDED`.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Any other non-success status.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The HTTP client could not be built.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// True when the credential itself is missing or rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_) | LlmError::ApiKeyNotFound(_)
        )
    }
}
