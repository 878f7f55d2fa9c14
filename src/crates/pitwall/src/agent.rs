//! The conversational agent and its function-calling loop.
//!
//! Each query runs a bounded loop: ask the model, and while it requests a
//! function, run it and feed the result back. The loop ends on the first
//! reply without a call, or when the call budget is spent.

use crate::classifier::ErrorCategory;
use crate::config::AgentConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::formatter::ResultFormatter;
use crate::prompt::system_prompt;
use crate::protocol::{pending_call_text, protocol_for, CallProtocol};
use f1_data::F1DataProvider;
use llm::{ChatModel, ChatRequest, ChatResponse, Message};
use serde::Serialize;
use std::sync::Arc;
use tooling::logging::{mask_secret, preview, timed};
use tracing::{debug, error, info, warn};

/// Characters of each function result shown in verbose logs.
const RESULT_PREVIEW_CHARS: usize = 200;

/// How one run of the loop ended.
enum Outcome {
    /// Text worth keeping in the history.
    Answer(String),
    /// The model produced nothing; carries the reply shown instead.
    Empty(String),
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the persistent conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    fn to_message(&self) -> Message {
        match self.role {
            Role::User => Message::human(self.text.clone()),
            Role::Assistant => Message::assistant(self.text.clone()),
        }
    }
}

/// An F1 assistant holding one conversation.
///
/// Queries on one agent run strictly one at a time (`&mut self`); hosts with
/// several conversations create one agent per conversation.
pub struct F1ChatAgent {
    model: Arc<dyn ChatModel>,
    dispatcher: Dispatcher,
    protocol: Box<dyn CallProtocol>,
    system_prompt: String,
    history: Vec<Turn>,
    temperature: f32,
    max_output_tokens: usize,
    max_function_calls: usize,
    verbose: bool,
}

impl F1ChatAgent {
    /// Create an agent from explicit model and provider handles.
    pub fn new(
        model: Arc<dyn ChatModel>,
        provider: Arc<dyn F1DataProvider>,
        config: &AgentConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut formatter = ResultFormatter::new();
        if let Some(cap) = config.max_records {
            formatter = formatter.with_max_records(cap);
        }
        let dispatcher = Dispatcher::new(provider)
            .with_default_year(config.default_year)
            .with_formatter(formatter);

        let protocol = protocol_for(config.protocol);
        let system_prompt = system_prompt(protocol.instructions());

        info!(
            model = %model.model_name(),
            protocol = %config.protocol,
            max_function_calls = config.max_function_calls,
            "F1 chat agent ready"
        );

        Ok(Self {
            model,
            dispatcher,
            protocol,
            system_prompt,
            history: Vec::new(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            max_function_calls: config.max_function_calls,
            verbose: config.verbose,
        })
    }

    /// Create an agent backed by Gemini and OpenF1.
    ///
    /// Fails fast when `GEMINI_API_KEY` is not configured.
    pub fn from_config(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let model = config.build_model()?;
        let provider = config.build_provider()?;

        if config.verbose {
            if let Some(key) = &config.api_key {
                info!(api_key = %mask_secret(key), "API key loaded");
            }
        }

        Self::new(model, provider, &config)
    }

    /// Answer one user query. Never fails; model errors become a reply.
    pub async fn process_query(&mut self, query: &str) -> String {
        self.history.push(Turn::user(query));

        match self.run_loop().await {
            Ok(Outcome::Answer(answer)) => {
                self.history.push(Turn::assistant(answer.clone()));
                answer
            }
            Ok(Outcome::Empty(reply)) => reply,
            Err(err) => {
                let category = ErrorCategory::classify(&err);
                error!(error = %err, category = ?category, "Query failed");
                category.user_message()
            }
        }
    }

    /// Forget the conversation so far.
    pub fn reset(&mut self) {
        debug!(turns = self.history.len(), "Clearing conversation history");
        self.history.clear();
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn max_function_calls(&self) -> usize {
        self.max_function_calls
    }

    fn base_context(&self) -> Vec<Message> {
        std::iter::once(Message::system(self.system_prompt.clone()))
            .chain(self.history.iter().map(Turn::to_message))
            .collect()
    }

    async fn run_loop(&self) -> llm::Result<Outcome> {
        let mut context = self.base_context();
        let mut calls_made = 0;

        loop {
            let request = self.protocol.prepare(
                ChatRequest::new(context.clone())
                    .with_temperature(self.temperature)
                    .with_max_tokens(self.max_output_tokens),
            );
            let response = timed("model.chat", self.model.chat(request)).await?;

            let Some(call) = self.protocol.extract(&response) else {
                if response.text().trim().is_empty() {
                    warn!(
                        finish_reason = ?response.finish_reason(),
                        block_reason = ?response.block_reason(),
                        "Model returned no text"
                    );
                    return Ok(Outcome::Empty(empty_reply(&response)));
                }
                return Ok(Outcome::Answer(response.text().to_string()));
            };

            if calls_made >= self.max_function_calls {
                warn!(
                    budget = self.max_function_calls,
                    function = %call.name,
                    "Function call budget exhausted, returning last model output"
                );
                return Ok(Outcome::Answer(pending_call_text(&response, &call)));
            }

            if self.verbose {
                info!(function = %call.name, call = %call.to_call_expression(), "Calling function");
            } else {
                debug!(function = %call.name, call = %call.to_call_expression(), "Calling function");
            }

            let result = self.dispatcher.dispatch(&call).await;

            if self.verbose {
                info!(result = %preview(&result, RESULT_PREVIEW_CHARS), "Function result");
            }

            context.extend(self.protocol.echo(&response, &call, &result));
            calls_made += 1;
        }
    }
}

/// Reply used when the model answers with no text and no call.
fn empty_reply(response: &ChatResponse) -> String {
    if let Some(reason) = response.block_reason() {
        return format!(
            "The model declined to answer this question (blocked: {}). Please rephrase it.",
            reason
        );
    }
    match response.finish_reason() {
        Some("MAX_TOKENS") => {
            "The model ran out of output tokens before answering. Please ask a narrower question."
                .to_string()
        }
        Some(reason) if reason != "STOP" => format!(
            "The model stopped without answering (finish reason: {}). Please try again.",
            reason
        ),
        _ => "The model returned an empty answer. Please try again.".to_string(),
    }
}
