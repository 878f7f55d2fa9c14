//! The fixed set of data functions the model may call.

use crate::config::DEFAULT_YEAR;
use llm::ToolDefinition;
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// A callable data function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    GetSessions,
    GetDrivers,
    GetLaps,
}

impl FunctionName {
    pub const ALL: [FunctionName; 3] = [
        FunctionName::GetSessions,
        FunctionName::GetDrivers,
        FunctionName::GetLaps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::GetSessions => "get_sessions",
            FunctionName::GetDrivers => "get_drivers",
            FunctionName::GetLaps => "get_laps",
        }
    }

    /// Declaration offered to models that support native function calling.
    pub fn definition(&self) -> ToolDefinition {
        match self {
            FunctionName::GetSessions => ToolDefinition::new(
                self.as_str(),
                "Get F1 sessions for a year, optionally narrowed by session type, session name \
                 or country. Use this to find the session key of a race or other event.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "year": {
                        "type": "integer",
                        "description": format!(
                            "Season to search, e.g. 2024. Defaults to {} when omitted",
                            DEFAULT_YEAR
                        )
                    },
                    "session_type": {
                        "type": "string",
                        "description": "Coarse session type: 'Race', 'Qualifying' or 'Practice'"
                    },
                    "session_name": {
                        "type": "string",
                        "description": "Specific session name, e.g. 'Race', 'Sprint', 'Sprint Qualifying', 'Practice 1'"
                    },
                    "country_name": {
                        "type": "string",
                        "description": "Host country, e.g. 'Bahrain', 'Saudi Arabia', 'Australia'"
                    }
                }
            })),
            FunctionName::GetDrivers => ToolDefinition::new(
                self.as_str(),
                "Get the drivers who took part in a session. Use this to map driver names \
                 to driver numbers.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "session_key": {
                        "type": "string",
                        "description": "Session key from get_sessions, or 'latest' for the most recent session"
                    }
                },
                "required": ["session_key"]
            })),
            FunctionName::GetLaps => ToolDefinition::new(
                self.as_str(),
                "Get lap data (lap times, sector times, pit-out flags) for a session, \
                 optionally for a single driver.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "session_key": {
                        "type": "string",
                        "description": "Session key from get_sessions, or 'latest' for the most recent session"
                    },
                    "driver_number": {
                        "type": "integer",
                        "description": "Only return laps for this driver number (see get_drivers)"
                    }
                },
                "required": ["session_key"]
            })),
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Declarations for every callable function.
pub fn function_definitions() -> Vec<ToolDefinition> {
    FunctionName::ALL.iter().map(FunctionName::definition).collect()
}
