//! Configuration loading utilities
//!
//! Typed accessors over process environment variables. A variable that is
//! set to an empty or whitespace-only string counts as unset.
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::config::{build_env_key, get_env_or, get_env_parse_or};
//!
//! let model = get_env_or(&build_env_key("PITWALL_", "model"), "gemini-2.5-flash-lite")?;
//! let budget: usize = get_env_parse_or(&build_env_key("PITWALL_", "max_function_calls"), 6)?;
//! ```

mod env;

pub use env::{
    build_env_key, get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or,
};
