//! Extraction of function call intents from model output.
//!
//! The text convention is a single line in the model's reply:
//!
//! ```text
//! FUNCTION_CALL: get_laps(session_key=9158, driver_number=63)
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Marker that introduces a function call in model text.
pub const CALL_MARKER: &str = "FUNCTION_CALL:";

/// Marker that introduces a function result echoed back to the model.
pub const RESULT_MARKER: &str = "FUNCTION_RESULT:";

/// A scalar function argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ArgValue {
    /// Infer a scalar from raw argument text.
    ///
    /// ASCII digits become `Int` (unless they overflow), `true`/`false` in
    /// any case become `Bool`, anything else stays `Str`.
    pub fn coerce(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return ArgValue::Int(n);
            }
        }
        if raw.eq_ignore_ascii_case("true") {
            ArgValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            ArgValue::Bool(false)
        } else {
            ArgValue::Str(raw.to_string())
        }
    }

    /// Integer view; digit strings count as integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            ArgValue::Str(s) => s.trim().parse().ok(),
            ArgValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&JsonValue> for ArgValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Bool(b) => ArgValue::Bool(*b),
            JsonValue::String(s) => ArgValue::Str(s.clone()),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                // 2024.0 arrives from some encoders for integer parameters
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        ArgValue::Int(f as i64)
                    }
                    _ => ArgValue::Str(n.to_string()),
                },
            },
            other => ArgValue::Str(other.to_string()),
        }
    }
}

/// A function the model asked to run, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: BTreeMap<String, ArgValue>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: ArgValue) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    pub fn arg(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key)
    }

    /// Build a call from a structured JSON argument object.
    ///
    /// Non-object arguments yield a call without arguments.
    pub fn from_json(name: impl Into<String>, arguments: &JsonValue) -> Self {
        let args = arguments
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(key, value)| (key.clone(), ArgValue::from(value)))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            name: name.into(),
            args,
        }
    }

    /// Arguments as a JSON object.
    pub fn args_json(&self) -> JsonValue {
        JsonValue::Object(
            self.args
                .iter()
                .map(|(key, value)| {
                    let json = match value {
                        ArgValue::Int(n) => JsonValue::from(*n),
                        ArgValue::Bool(b) => JsonValue::Bool(*b),
                        ArgValue::Str(s) => JsonValue::String(s.clone()),
                    };
                    (key.clone(), json)
                })
                .collect(),
        )
    }

    /// Render as `name(key=value, ...)`, quoting string values.
    pub fn to_call_expression(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|(key, value)| match value {
                ArgValue::Str(s) => format!("{}=\"{}\"", key, s),
                other => format!("{}={}", key, other),
            })
            .collect();
        format!("{}({})", self.name, args.join(", "))
    }
}

/// Extract a call from model text following the `FUNCTION_CALL:` convention.
///
/// Only the first line carrying the marker is considered. Returns `None`
/// when there is no marker, no parentheses, or no function name. Argument
/// pieces without `=` are skipped.
pub fn parse_function_call(text: &str) -> Option<FunctionCall> {
    let line = text.lines().find(|line| line.contains(CALL_MARKER))?;
    let call = line.replace(CALL_MARKER, "");
    let call = call.trim();

    if !call.contains('(') || !call.contains(')') {
        return None;
    }

    let (name, rest) = call.split_once('(')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let arg_text = rest.find(')').map_or(rest, |end| &rest[..end]).trim();

    let args = arg_text
        .split(',')
        .filter_map(|piece| piece.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (key.trim().to_string(), ArgValue::coerce(value))
        })
        .collect();

    Some(FunctionCall {
        name: name.to_string(),
        args,
    })
}
