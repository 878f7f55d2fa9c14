//! The data provider contract and its query types.

use crate::error::{ProviderError, Result};
use crate::types::{Driver, Lap, Session};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Identifies a session: a literal key, or the provider's most recent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    /// Reserved sentinel `"latest"`.
    Latest,
    Id(u32),
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::Latest => write!(f, "latest"),
            SessionKey::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for SessionKey {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(SessionKey::Latest);
        }

        trimmed
            .parse::<u32>()
            .map(SessionKey::Id)
            .map_err(|_| {
                ProviderError::InvalidArgument(format!(
                    "session_key must be a numeric key or \"latest\", got {:?}",
                    s
                ))
            })
    }
}

impl From<u32> for SessionKey {
    fn from(id: u32) -> Self {
        SessionKey::Id(id)
    }
}

/// Filters for a sessions lookup. All filters are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub year: i32,
    pub session_type: Option<String>,
    pub session_name: Option<String>,
    pub country_name: Option<String>,
}

impl SessionQuery {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            session_type: None,
            session_name: None,
            country_name: None,
        }
    }

    pub fn with_session_type(mut self, session_type: impl Into<String>) -> Self {
        self.session_type = Some(session_type.into());
        self
    }

    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.session_name = Some(session_name.into());
        self
    }

    pub fn with_country_name(mut self, country_name: impl Into<String>) -> Self {
        self.country_name = Some(country_name.into());
        self
    }

    /// Query-string pairs in a stable order; unset filters are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("year", self.year.to_string())];

        if let Some(session_type) = &self.session_type {
            params.push(("session_type", session_type.clone()));
        }
        if let Some(session_name) = &self.session_name {
            params.push(("session_name", session_name.clone()));
        }
        if let Some(country_name) = &self.country_name {
            params.push(("country_name", country_name.clone()));
        }

        params
    }
}

/// Read-only source of sessions, drivers and laps.
///
/// Implementations never retry; one failed call surfaces immediately.
#[async_trait]
pub trait F1DataProvider: Send + Sync {
    /// Sessions matching every filter in `query`.
    async fn fetch_sessions(&self, query: &SessionQuery) -> Result<Vec<Session>>;

    /// Drivers entered in one session.
    async fn fetch_drivers(&self, session_key: &SessionKey) -> Result<Vec<Driver>>;

    /// Laps of one session, optionally filtered server-side to one driver.
    async fn fetch_laps(
        &self,
        session_key: &SessionKey,
        driver_number: Option<u32>,
    ) -> Result<Vec<Lap>>;
}
