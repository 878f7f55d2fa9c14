//! Mapping of model failures to user-facing replies.

use llm::LlmError;
use tooling::logging::sanitize_for_logging;

/// What went wrong while talking to the model, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing, malformed or rejected API key.
    Credential,
    /// Quota or rate limit reached.
    RateLimit,
    /// Key lacks access to the model.
    Permission,
    /// Anything else, with the (redacted) error text.
    Other(String),
}

impl ErrorCategory {
    /// Classify a model error, trusting its variant before its message.
    pub fn classify(err: &LlmError) -> Self {
        match err {
            err if err.is_auth_error() => ErrorCategory::Credential,
            LlmError::RateLimitExceeded(_) => ErrorCategory::RateLimit,
            LlmError::PermissionDenied(_) => ErrorCategory::Permission,
            other => Self::from_message(&other.to_string()),
        }
    }

    /// Classify from error text alone, by case-insensitive keyword.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("api key") {
            ErrorCategory::Credential
        } else if lower.contains("quota") || lower.contains("limit") {
            ErrorCategory::RateLimit
        } else if lower.contains("permission") {
            ErrorCategory::Permission
        } else {
            ErrorCategory::Other(sanitize_for_logging(message))
        }
    }

    /// The reply shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ErrorCategory::Credential => {
                "API key error. Please check your GEMINI_API_KEY setting.".to_string()
            }
            ErrorCategory::RateLimit => {
                "API quota exceeded. Please check your Gemini API usage limits.".to_string()
            }
            ErrorCategory::Permission => {
                "Permission error. Please check your Gemini API key permissions.".to_string()
            }
            ErrorCategory::Other(detail) => format!("Error processing query: {}", detail),
        }
    }
}

/// Classify `err` and return the reply for the user.
pub fn classify_error(err: &LlmError) -> String {
    ErrorCategory::classify(err).user_message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_variants() {
        assert_eq!(
            ErrorCategory::classify(&LlmError::AuthenticationError("bad".into())),
            ErrorCategory::Credential
        );
        assert_eq!(
            ErrorCategory::classify(&LlmError::ApiKeyNotFound("GEMINI_API_KEY".into())),
            ErrorCategory::Credential
        );
        assert_eq!(
            ErrorCategory::classify(&LlmError::RateLimitExceeded("slow".into())),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            ErrorCategory::classify(&LlmError::PermissionDenied("no".into())),
            ErrorCategory::Permission
        );
    }

    #[test]
    fn test_message_heuristics() {
        assert_eq!(
            ErrorCategory::classify(&LlmError::ProviderError("Invalid API KEY supplied".into())),
            ErrorCategory::Credential
        );
        assert_eq!(
            ErrorCategory::from_message("Daily LIMIT reached"),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            ErrorCategory::from_message("quota exhausted"),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            ErrorCategory::from_message("caller lacks Permission"),
            ErrorCategory::Permission
        );
    }

    #[test]
    fn test_other_carries_detail() {
        let reply = classify_error(&LlmError::Timeout("no response after 60s".into()));
        assert_eq!(
            reply,
            "Error processing query: Request timeout: no response after 60s"
        );
    }

    #[test]
    fn test_other_redacts_key_in_url() {
        let category = ErrorCategory::from_message(
            "error sending request for url (https://example.com/models/m:generateContent?key=AIzaSySecret)",
        );
        match category {
            ErrorCategory::Other(detail) => assert!(!detail.contains("AIzaSySecret")),
            other => panic!("unexpected category: {:?}", other),
        }
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ErrorCategory::Credential.user_message(),
            "API key error. Please check your GEMINI_API_KEY setting."
        );
        assert_eq!(
            ErrorCategory::RateLimit.user_message(),
            "API quota exceeded. Please check your Gemini API usage limits."
        );
        assert_eq!(
            ErrorCategory::Permission.user_message(),
            "Permission error. Please check your Gemini API key permissions."
        );
    }
}
