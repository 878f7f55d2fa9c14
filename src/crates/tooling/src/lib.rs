//! Shared helpers for the pitwall workspace.
//!
//! # Modules
//!
//! - `config` - Typed environment variable loading
//! - `logging` - Timing, redaction and preview helpers for tracing output

pub mod config;
pub mod logging;

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// Variable is set but its value is unusable
    #[error("Invalid value for {key}: {reason}")]
    InvalidEnv { key: String, reason: String },

    /// Variable is set but is not valid UTF-8
    #[error("Environment variable {key} contains invalid UTF-8")]
    NotUnicode { key: String },
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;
