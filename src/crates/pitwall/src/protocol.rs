//! Wire encodings for function calls between the agent and the model.
//!
//! Both encodings produce the same [`FunctionCall`] intent; they differ in
//! how the request advertises the functions and how a finished round is
//! folded back into the conversation.

use crate::config::ProtocolKind;
use crate::functions::function_definitions;
use crate::parser::{parse_function_call, FunctionCall, CALL_MARKER, RESULT_MARKER};
use llm::{ChatRequest, ChatResponse, Message, ToolCall};

/// One function-calling encoding.
pub trait CallProtocol: Send + Sync {
    fn kind(&self) -> ProtocolKind;

    /// Calling instructions appended to the system prompt.
    fn instructions(&self) -> &'static str;

    /// Adjust an outgoing request before it is sent.
    fn prepare(&self, request: ChatRequest) -> ChatRequest;

    /// The call the model asked for, if any.
    fn extract(&self, response: &ChatResponse) -> Option<FunctionCall>;

    /// Messages that record the model's request and the function's result.
    fn echo(&self, response: &ChatResponse, call: &FunctionCall, result: &str) -> Vec<Message>;
}

/// Build the protocol for `kind`.
pub fn protocol_for(kind: ProtocolKind) -> Box<dyn CallProtocol> {
    match kind {
        ProtocolKind::Text => Box::new(TextConvention),
        ProtocolKind::Native => Box::new(NativeCalls),
    }
}

/// `FUNCTION_CALL:` lines in free text, answered with `FUNCTION_RESULT:` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConvention;

impl CallProtocol for TextConvention {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Text
    }

    fn instructions(&self) -> &'static str {
        "When you need to call a function, respond with exactly this format:\n\
         FUNCTION_CALL: function_name(arg1=value1, arg2=value2)\n\n\
         I will run the function and reply with a line starting with FUNCTION_RESULT:. \
         Then analyse the data and give a helpful answer."
    }

    fn prepare(&self, request: ChatRequest) -> ChatRequest {
        request
    }

    fn extract(&self, response: &ChatResponse) -> Option<FunctionCall> {
        parse_function_call(response.text())
    }

    fn echo(&self, response: &ChatResponse, call: &FunctionCall, result: &str) -> Vec<Message> {
        vec![
            Message::assistant(response.text()),
            Message::human(format!("{} {} -> {}", RESULT_MARKER, call.name, result)),
        ]
    }
}

/// Structured tool calls through the model API.
///
/// Only the first call of a response is executed; the echo replays exactly
/// that call so requests and results stay paired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCalls;

impl CallProtocol for NativeCalls {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Native
    }

    fn instructions(&self) -> &'static str {
        "Call the provided functions whenever you need data. After the results \
         come back, analyse them and give a helpful answer."
    }

    fn prepare(&self, request: ChatRequest) -> ChatRequest {
        request.with_tools(function_definitions())
    }

    fn extract(&self, response: &ChatResponse) -> Option<FunctionCall> {
        let call = response.tool_calls().first()?;
        if call.name.trim().is_empty() {
            return None;
        }
        Some(FunctionCall::from_json(call.name.clone(), &call.arguments))
    }

    fn echo(&self, response: &ChatResponse, call: &FunctionCall, result: &str) -> Vec<Message> {
        let requested = response
            .tool_calls()
            .first()
            .cloned()
            .unwrap_or_else(|| ToolCall::new("call_0", call.name.clone(), call.args_json()));

        vec![
            Message::assistant(response.text()).with_tool_calls(vec![requested]),
            Message::tool(call.name.clone(), result),
        ]
    }
}

/// Text shown when the call budget runs out on a pure tool-call reply.
pub(crate) fn pending_call_text(response: &ChatResponse, call: &FunctionCall) -> String {
    let text = response.text();
    if text.trim().is_empty() {
        format!("{} {}", CALL_MARKER, call.to_call_expression())
    } else {
        text.to_string()
    }
}
