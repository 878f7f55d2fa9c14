//! Error types for the OpenF1 client.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur when querying the data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{endpoint} request failed with status {status}")]
    ProviderUnavailable {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// A record could not be mapped onto its entity type.
    #[error("malformed {endpoint} record at index {index}: {reason}")]
    MalformedRecord {
        endpoint: String,
        index: usize,
        reason: String,
    },

    /// The response body was not a JSON array of records.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A query argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// HTTP status recorded for provider failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::ProviderUnavailable { status, .. } => Some(*status),
            ProviderError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_records_status() {
        let err = ProviderError::ProviderUnavailable {
            endpoint: "laps".to_string(),
            status: 500,
            body: "boom".to_string(),
        };

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "laps request failed with status 500");
    }

    #[test]
    fn test_malformed_record_message() {
        let err = ProviderError::MalformedRecord {
            endpoint: "drivers".to_string(),
            index: 3,
            reason: "missing field `full_name`".to_string(),
        };

        assert!(err.to_string().contains("index 3"));
        assert!(err.to_string().contains("full_name"));
        assert_eq!(err.status(), None);
    }
}
