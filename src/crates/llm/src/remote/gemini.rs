//! Google Gemini client implementation.
//!
//! Talks to the `generateContent` endpoint of the Gemini REST API and
//! supports native function calling.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::GeminiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "GEMINI_API_KEY",
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-2.5-flash-lite",
//! )?;
//! let client = GeminiClient::new(config)?;
//!
//! let request = ChatRequest::new(vec![Message::human("Hello!")]);
//! let response = client.chat(request).await?;
//! ```

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::message::{Message, MessageRole};
use crate::request::ChatRequest;
use crate::response::{ChatResponse, UsageMetadata};
use crate::tools::{ToolCall, ToolDefinition};
use crate::traits::ChatModel;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

/// Default endpoint for the public Gemini API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Split messages into a system instruction and the `contents` list.
    ///
    /// Tool results travel as `functionResponse` parts in a user turn and
    /// assistant tool calls as `functionCall` parts in a model turn.
    fn convert_messages(messages: &[Message]) -> (Option<GeminiContent>, Vec<GeminiContent>) {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for msg in messages {
            match msg.role {
                MessageRole::System => system_parts.push(GeminiPart::text(msg.text())),
                MessageRole::Human => contents.push(GeminiContent {
                    role: Some("user".to_string()),
                    parts: vec![GeminiPart::text(msg.text())],
                }),
                MessageRole::Assistant => {
                    let mut parts = Vec::new();
                    if !msg.content.trim().is_empty() {
                        parts.push(GeminiPart::text(msg.text()));
                    }
                    for call in msg.tool_calls.iter().flatten() {
                        parts.push(GeminiPart {
                            function_call: Some(GeminiFunctionCall {
                                name: call.name.clone(),
                                args: call.arguments.clone(),
                            }),
                            ..Default::default()
                        });
                    }
                    // Gemini rejects empty text parts
                    if parts.is_empty() {
                        continue;
                    }
                    contents.push(GeminiContent {
                        role: Some("model".to_string()),
                        parts,
                    });
                }
                MessageRole::Tool => {
                    let name = msg.name.clone().unwrap_or_else(|| "function".to_string());
                    contents.push(GeminiContent {
                        role: Some("user".to_string()),
                        parts: vec![GeminiPart {
                            function_response: Some(GeminiFunctionResponse {
                                response: json!({ "name": name, "content": msg.content }),
                                name,
                            }),
                            ..Default::default()
                        }],
                    });
                }
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: system_parts,
            })
        };

        (system_instruction, contents)
    }

    fn convert_tools(tools: &[ToolDefinition]) -> Option<Vec<GeminiTool>> {
        if tools.is_empty() {
            return None;
        }
        Some(vec![GeminiTool {
            function_declarations: tools
                .iter()
                .map(|tool| GeminiFunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters.clone(),
                })
                .collect(),
        }])
    }

    fn build_request(request: &ChatRequest) -> GeminiRequest {
        let (system_instruction, contents) = Self::convert_messages(&request.messages);
        let config = &request.config;

        GeminiRequest {
            contents,
            system_instruction,
            tools: Self::convert_tools(&config.tools),
            generation_config: Some(GeminiGenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
            }),
        }
    }

    /// Convert Gemini response to ChatResponse.
    ///
    /// A response without candidates (for example a blocked prompt) yields an
    /// empty assistant message.
    fn convert_response(&self, gemini_resp: GeminiResponse) -> ChatResponse {
        let mut text = String::new();
        let mut tool_calls = Vec::new();
        let mut finish_reason = None;

        if let Some(candidate) = gemini_resp.candidates.into_iter().next() {
            finish_reason = candidate.finish_reason;
            for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
                if let Some(chunk) = part.text {
                    text.push_str(&chunk);
                }
                if let Some(call) = part.function_call {
                    let id = format!("call_{}", tool_calls.len());
                    tool_calls.push(ToolCall::new(id, call.name, call.args));
                }
            }
        }

        let mut response = ChatResponse::new(Message::assistant(text).with_tool_calls(tool_calls))
            .with_metadata("model", JsonValue::String(self.config.model.clone()));

        if let Some(reason) = finish_reason {
            response = response.with_metadata("finish_reason", JsonValue::String(reason));
        }
        if let Some(reason) = gemini_resp.prompt_feedback.and_then(|f| f.block_reason) {
            warn!(block_reason = %reason, "Gemini blocked the prompt");
            response = response.with_metadata("block_reason", JsonValue::String(reason));
        }
        if let Some(usage) = gemini_resp.usage_metadata {
            response = response.with_usage(UsageMetadata::new(
                usage.prompt_token_count,
                usage.candidates_token_count,
            ));
        }

        response
    }
}

/// Map a failed Gemini HTTP response onto an [`LlmError`].
///
/// The structured `error.status` field wins over the bare HTTP code. Gemini
/// reports a bad key as `400 INVALID_ARGUMENT` with a message naming the key.
pub(crate) fn map_error_status(status: StatusCode, body: &str) -> LlmError {
    let detail = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    let api_status = detail.and_then(|d| d.status).unwrap_or_default();

    let mentions_key = message.to_lowercase().contains("api key");

    match (api_status.as_str(), status.as_u16()) {
        ("UNAUTHENTICATED", _) | (_, 401) => LlmError::AuthenticationError(message),
        ("INVALID_ARGUMENT", _) | (_, 400) if mentions_key => LlmError::AuthenticationError(message),
        ("PERMISSION_DENIED", _) | (_, 403) => LlmError::PermissionDenied(message),
        ("RESOURCE_EXHAUSTED", _) | (_, 429) => LlmError::RateLimitExceeded(message),
        ("NOT_FOUND", _) | (_, 404) => LlmError::ModelNotFound(message),
        ("UNAVAILABLE", _) | (_, 503) => LlmError::ServiceUnavailable(message),
        ("DEADLINE_EXCEEDED", _) | (_, 504) => LlmError::Timeout(message),
        _ => LlmError::ProviderError(format!("Gemini API error {}: {}", status, message)),
    }
}

fn map_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(err.to_string())
    } else {
        LlmError::HttpError(err)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        // Gemini API URL format: base_url/models/{model}:generateContent
        let url = format!("{}:generateContent", self.model_url());
        let req_body = Self::build_request(&request);

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tools = request.config.tools.len(),
            "Sending Gemini generateContent request"
        );

        // Gemini uses API key as query parameter
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .json(&req_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini request failed");
            return Err(map_error_status(status, &error_text));
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(self.convert_response(gemini_resp))
    }

    async fn is_available(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.model_url())
            .query(&[("key", &self.config.api_key)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let error_text = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &error_text))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<GeminiFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<GeminiFunctionResponse>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: JsonValue,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionResponse {
    name: String,
    response: JsonValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct GeminiFunctionDeclaration {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    status: Option<String>,
}
