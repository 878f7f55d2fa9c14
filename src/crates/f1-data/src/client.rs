//! HTTP implementation of [`F1DataProvider`] against the OpenF1 REST API.
//!
//! Each lookup is a single `GET {base_url}/{endpoint}` with query-string
//! filters. The response must be a JSON array; every element is mapped onto
//! its entity type or the whole call fails.

use crate::error::{ProviderError, Result};
use crate::provider::{F1DataProvider, SessionKey, SessionQuery};
use crate::types::{Driver, Lap, Session};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public OpenF1 endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";

/// Number of records echoed to the debug log after each retrieval.
const PREVIEW_RECORDS: usize = 3;

/// Configuration for the OpenF1 client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint root, without trailing slash.
    pub base_url: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: default_timeout(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// OpenF1 API client.
#[derive(Debug, Clone)]
pub struct OpenF1Client {
    config: ProviderConfig,
    client: Client,
}

impl OpenF1Client {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Fetch one endpoint and map every record onto `T`.
    async fn get_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Failed to fetch {}. Status code: {}", endpoint, status.as_u16());
            return Err(ProviderError::ProviderUnavailable {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", endpoint, e)))?;

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record).map_err(|e| ProviderError::MalformedRecord {
                    endpoint: endpoint.to_string(),
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

fn log_preview<T: Display>(items: &[T]) {
    for item in items.iter().take(PREVIEW_RECORDS) {
        debug!("  - {}", item);
    }
    if items.len() > PREVIEW_RECORDS {
        debug!("  ... and {} more", items.len() - PREVIEW_RECORDS);
    }
}

#[async_trait]
impl F1DataProvider for OpenF1Client {
    async fn fetch_sessions(&self, query: &SessionQuery) -> Result<Vec<Session>> {
        let sessions: Vec<Session> = self.get_records("sessions", &query.to_params()).await?;

        info!("Retrieved {} sessions for {}", sessions.len(), query.year);
        log_preview(&sessions);

        Ok(sessions)
    }

    async fn fetch_drivers(&self, session_key: &SessionKey) -> Result<Vec<Driver>> {
        let params = [("session_key", session_key.to_string())];
        let drivers: Vec<Driver> = self.get_records("drivers", &params).await?;

        info!("Retrieved {} drivers for session {}", drivers.len(), session_key);
        log_preview(&drivers);

        Ok(drivers)
    }

    async fn fetch_laps(
        &self,
        session_key: &SessionKey,
        driver_number: Option<u32>,
    ) -> Result<Vec<Lap>> {
        let mut params = vec![("session_key", session_key.to_string())];
        if let Some(number) = driver_number {
            params.push(("driver_number", number.to_string()));
        }

        let laps: Vec<Lap> = self.get_records("laps", &params).await?;

        info!("Retrieved {} laps for session {}", laps.len(), session_key);
        log_preview(&laps);

        Ok(laps)
    }
}
