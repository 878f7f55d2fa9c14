//! Environment variable loading utilities

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a trimmed string
///
/// * `Ok(Some(value))` if the variable holds non-blank text
/// * `Ok(None)` if it is missing or blank
/// * `Err` if it is not valid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::NotUnicode {
            key: key.to_string(),
        }),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let budget: Option<usize> = get_env_parse("PITWALL_MAX_FUNCTION_CALLS")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env(key)?
        .map(|val| {
            val.parse::<T>().map_err(|e| ToolingError::InvalidEnv {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Load an environment variable, falling back to `default` when unset
pub fn get_env_or(key: &str, default: impl Into<String>) -> Result<String> {
    Ok(get_env(key)?.unwrap_or_else(|| default.into()))
}

/// Load and parse an environment variable, falling back to `default` when unset
///
/// A value that is set but does not parse is still an error.
pub fn get_env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse(key)?.unwrap_or(default))
}

/// Load a boolean environment variable
///
/// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    let Some(val) = get_env(key)? else {
        return Ok(None);
    };

    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ToolingError::InvalidEnv {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{}'", val),
        }),
    }
}

/// Build a prefixed environment variable name
///
/// `build_env_key("PITWALL_", "model")` returns `"PITWALL_MODEL"`.
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
