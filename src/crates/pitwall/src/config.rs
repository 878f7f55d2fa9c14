//! Agent configuration loaded from the environment.
//!
//! Every setting has a default; `PITWALL_`-prefixed variables override it and
//! CLI flags override those. The model credential is read from
//! `GEMINI_API_KEY`.

use crate::error::{AgentError, Result};
use f1_data::{OpenF1Client, ProviderConfig, DEFAULT_BASE_URL};
use llm::remote::{GeminiClient, GEMINI_BASE_URL};
use llm::RemoteLlmConfig;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tooling::config::{build_env_key, get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Prefix for all other settings.
pub const ENV_PREFIX: &str = "PITWALL_";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 2048;
pub const DEFAULT_MAX_FUNCTION_CALLS: usize = 6;

/// Season used by `get_sessions` when the model omits `year`.
pub const DEFAULT_YEAR: i32 = 2025;

/// How function calls travel between the agent and the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolKind {
    /// `FUNCTION_CALL:` lines in plain model text.
    #[default]
    Text,
    /// Structured tool calls through the model API.
    Native,
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolKind::Text => write!(f, "text"),
            ProtocolKind::Native => write!(f, "native"),
        }
    }
}

impl FromStr for ProtocolKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "convention" => Ok(ProtocolKind::Text),
            "native" | "tools" => Ok(ProtocolKind::Native),
            other => Err(format!(
                "unknown protocol '{}', expected 'text' or 'native'",
                other
            )),
        }
    }
}

/// Settings for one [`crate::F1ChatAgent`].
#[derive(Clone)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub gemini_base_url: String,
    pub openf1_base_url: String,
    pub temperature: f32,
    pub max_output_tokens: usize,
    /// Dispatch rounds allowed per query.
    pub max_function_calls: usize,
    pub default_year: i32,
    pub protocol: ProtocolKind,
    /// Cap on records rendered per function result. `None` renders all.
    pub max_records: Option<usize>,
    pub verbose: bool,
    pub model_timeout: Duration,
    pub provider_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            openf1_base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_function_calls: DEFAULT_MAX_FUNCTION_CALLS,
            default_year: DEFAULT_YEAR,
            protocol: ProtocolKind::default(),
            max_records: None,
            verbose: false,
            model_timeout: Duration::from_secs(60),
            provider_timeout: Duration::from_secs(30),
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `GEMINI_API_KEY` and `PITWALL_*` variables.
    ///
    /// A missing key is not an error here; [`AgentConfig::build_model`]
    /// reports it when a model is actually needed.
    pub fn from_env() -> Result<Self> {
        let key = |name: &str| build_env_key(ENV_PREFIX, name);
        let defaults = Self::default();

        let protocol = match get_env(&key("protocol"))? {
            Some(raw) => raw.parse().map_err(AgentError::Config)?,
            None => defaults.protocol,
        };

        Ok(Self {
            api_key: get_env(API_KEY_ENV)?,
            model: get_env_or(&key("model"), defaults.model)?,
            gemini_base_url: get_env_or(&key("gemini_base_url"), defaults.gemini_base_url)?,
            openf1_base_url: get_env_or(&key("openf1_base_url"), defaults.openf1_base_url)?,
            temperature: get_env_parse_or(&key("temperature"), defaults.temperature)?,
            max_output_tokens: get_env_parse_or(&key("max_output_tokens"), defaults.max_output_tokens)?,
            max_function_calls: get_env_parse_or(&key("max_function_calls"), defaults.max_function_calls)?,
            default_year: get_env_parse_or(&key("default_year"), defaults.default_year)?,
            protocol,
            max_records: get_env_parse(&key("max_records"))?,
            verbose: get_env_bool(&key("verbose"))?.unwrap_or(defaults.verbose),
            ..defaults
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = url.into();
        self
    }

    pub fn with_openf1_base_url(mut self, url: impl Into<String>) -> Self {
        self.openf1_base_url = url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_max_function_calls(mut self, max_function_calls: usize) -> Self {
        self.max_function_calls = max_function_calls;
        self
    }

    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolKind) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject settings the agent cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_function_calls == 0 {
            return Err(AgentError::Config(
                "max_function_calls must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AgentError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(AgentError::Config(
                "max_output_tokens must be at least 1".to_string(),
            ));
        }
        if self.max_records == Some(0) {
            return Err(AgentError::Config(
                "max_records must be at least 1 when set".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(AgentError::Config("model must not be empty".to_string()));
        }
        Ok(())
    }

    /// Build the Gemini client. Fails when no API key is configured.
    pub fn build_model(&self) -> Result<Arc<GeminiClient>> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| AgentError::MissingCredential(API_KEY_ENV.to_string()))?;

        let config = RemoteLlmConfig::new(api_key, self.gemini_base_url.clone(), self.model.clone())
            .with_timeout(self.model_timeout);

        Ok(Arc::new(GeminiClient::new(config)?))
    }

    /// Build the OpenF1 client.
    pub fn build_provider(&self) -> Result<Arc<OpenF1Client>> {
        let config = ProviderConfig::new(self.openf1_base_url.clone())
            .with_timeout(self.provider_timeout);
        Ok(Arc::new(OpenF1Client::new(config)?))
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("openf1_base_url", &self.openf1_base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("max_function_calls", &self.max_function_calls)
            .field("default_year", &self.default_year)
            .field("protocol", &self.protocol)
            .field("max_records", &self.max_records)
            .field("verbose", &self.verbose)
            .finish()
    }
}
