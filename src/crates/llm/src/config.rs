//! Configuration for remote LLM providers.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for remote LLM providers.
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    ///
    /// Example: "https://generativelanguage.googleapis.com/v1beta"
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl RemoteLlmConfig {
    /// Create a new remote LLM configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            timeout: default_timeout(),
        }
    }

    /// Create configuration from environment variable.
    ///
    /// A variable that is present but blank counts as missing.
    pub fn from_env(
        env_var: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var))
            })?;

        Ok(Self::new(api_key, base_url, model))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the key out of debug output.
impl std::fmt::Debug for RemoteLlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_builder() {
        let config = RemoteLlmConfig::new(
            "test-key",
            "https://generativelanguage.googleapis.com/v1beta",
            "gemini-2.5-flash-lite",
        )
        .with_timeout(Duration::from_secs(120));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "gemini-2.5-flash-lite");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_from_env_missing() {
        let result = RemoteLlmConfig::from_env(
            "LLM_TEST_MISSING_KEY_12345",
            "https://example.com",
            "model",
        );
        assert!(matches!(result, Err(LlmError::ApiKeyNotFound(_))));
    }

    #[test]
    fn test_from_env_blank_is_missing() {
        std::env::set_var("LLM_TEST_BLANK_KEY", "   ");
        let result = RemoteLlmConfig::from_env("LLM_TEST_BLANK_KEY", "https://example.com", "m");
        assert!(result.is_err());
        std::env::remove_var("LLM_TEST_BLANK_KEY");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = RemoteLlmConfig::new("super-secret", "https://example.com", "m");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
