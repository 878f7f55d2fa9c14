//! pitwall: a conversational F1 data assistant.
//!
//! An LLM answers questions about Formula 1 sessions, drivers and lap times
//! by calling a small set of read-only functions backed by the OpenF1 API.
//!
//! # Architecture
//!
//! - [`parser`] and [`protocol`] turn model output into a [`FunctionCall`]
//! - [`dispatcher`] runs the call against an [`f1_data::F1DataProvider`]
//! - [`formatter`] renders the records for the model's next turn
//! - [`agent`] drives the bounded ask/call/answer loop
//! - [`classifier`] turns model failures into user-facing replies
//!
//! # Example
//!
//! ```rust,ignore
//! use pitwall::{AgentConfig, F1ChatAgent};
//!
//! let mut agent = F1ChatAgent::from_config(AgentConfig::from_env()?)?;
//! let answer = agent.process_query("Show me all drivers in the latest race").await;
//! println!("{}", answer);
//! ```

pub mod agent;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod functions;
pub mod parser;
pub mod prompt;
pub mod protocol;

pub use agent::{F1ChatAgent, Role, Turn};
pub use classifier::{classify_error, ErrorCategory};
pub use config::{AgentConfig, ProtocolKind};
pub use dispatcher::Dispatcher;
pub use error::{AgentError, Result};
pub use formatter::{FunctionResult, ResultFormatter};
pub use functions::{function_definitions, FunctionName};
pub use parser::{parse_function_call, ArgValue, FunctionCall};
pub use protocol::{CallProtocol, NativeCalls, TextConvention};
