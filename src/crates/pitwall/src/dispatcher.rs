//! Execution of function calls against the data provider.
//!
//! Every outcome is text: formatted records, or an error line the model can
//! read and react to on its next turn.

use crate::config::DEFAULT_YEAR;
use crate::error::{AgentError, Result};
use crate::formatter::{FunctionResult, ResultFormatter};
use crate::functions::FunctionName;
use crate::parser::{ArgValue, FunctionCall};
use f1_data::{F1DataProvider, SessionKey, SessionQuery};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes a [`FunctionCall`] to the matching provider operation.
pub struct Dispatcher {
    provider: Arc<dyn F1DataProvider>,
    formatter: ResultFormatter,
    default_year: i32,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn F1DataProvider>) -> Self {
        Self {
            provider,
            formatter: ResultFormatter::default(),
            default_year: DEFAULT_YEAR,
        }
    }

    /// Year used by `get_sessions` when the call omits it.
    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Run `call` and render its outcome. Never fails.
    pub async fn dispatch(&self, call: &FunctionCall) -> String {
        let name = match call.name.parse::<FunctionName>() {
            Ok(name) => name,
            Err(_) => {
                warn!(function = %call.name, "Model requested an unknown function");
                return format!("Unknown function: {}", call.name);
            }
        };

        match self.invoke(name, call).await {
            Ok(result) => {
                debug!(function = %name, records = result.len(), "Function call succeeded");
                self.formatter.format(name.as_str(), Some(&result))
            }
            Err(err) => {
                let status = match &err {
                    AgentError::Provider(provider_err) => provider_err.status(),
                    _ => None,
                };
                warn!(function = %name, status = ?status, error = %err, "Function call failed");
                format!("Error calling {}: {}", call.name, err)
            }
        }
    }

    async fn invoke(&self, name: FunctionName, call: &FunctionCall) -> Result<FunctionResult> {
        match name {
            FunctionName::GetSessions => {
                let year = match call.arg("year") {
                    Some(value) => integer_arg::<i32>("year", value)?,
                    None => self.default_year,
                };

                let mut query = SessionQuery::new(year);
                if let Some(value) = call.arg("session_type") {
                    query = query.with_session_type(value.to_string());
                }
                if let Some(value) = call.arg("session_name") {
                    query = query.with_session_name(value.to_string());
                }
                if let Some(value) = call.arg("country_name") {
                    query = query.with_country_name(value.to_string());
                }

                Ok(FunctionResult::Sessions(
                    self.provider.fetch_sessions(&query).await?,
                ))
            }
            FunctionName::GetDrivers => {
                let session_key = session_key_arg(call)?;
                Ok(FunctionResult::Drivers(
                    self.provider.fetch_drivers(&session_key).await?,
                ))
            }
            FunctionName::GetLaps => {
                let session_key = session_key_arg(call)?;
                let driver_number = call
                    .arg("driver_number")
                    .map(|value| integer_arg::<u32>("driver_number", value))
                    .transpose()?;
                Ok(FunctionResult::Laps(
                    self.provider.fetch_laps(&session_key, driver_number).await?,
                ))
            }
        }
    }
}

fn integer_arg<T: TryFrom<i64>>(name: &str, value: &ArgValue) -> Result<T> {
    value
        .as_i64()
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| AgentError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a non-negative integer, got {:?}", value.to_string()),
        })
}

fn session_key_arg(call: &FunctionCall) -> Result<SessionKey> {
    let value = call
        .arg("session_key")
        .ok_or_else(|| AgentError::MissingArgument("session_key".to_string()))?;

    match value {
        ArgValue::Int(n) => u32::try_from(*n)
            .map(SessionKey::Id)
            .map_err(|_| AgentError::InvalidArgument {
                name: "session_key".to_string(),
                reason: format!("{} is out of range", n),
            }),
        ArgValue::Str(s) => s.parse::<SessionKey>().map_err(|e| AgentError::InvalidArgument {
            name: "session_key".to_string(),
            reason: e.to_string(),
        }),
        ArgValue::Bool(b) => Err(AgentError::InvalidArgument {
            name: "session_key".to_string(),
            reason: format!("expected a session key or \"latest\", got {}", b),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use f1_data::{Driver, Lap, ProviderError, Session};
    use std::sync::Mutex;

    /// Records every query and answers with empty lists or a fixed error.
    #[derive(Default)]
    struct RecordingProvider {
        sessions: Mutex<Vec<SessionQuery>>,
        laps: Mutex<Vec<(SessionKey, Option<u32>)>>,
        drivers: Mutex<Vec<SessionKey>>,
        fail_with_status: Option<u16>,
    }

    impl RecordingProvider {
        fn check(&self, endpoint: &str) -> f1_data::Result<()> {
            match self.fail_with_status {
                Some(status) => Err(ProviderError::ProviderUnavailable {
                    endpoint: endpoint.to_string(),
                    status,
                    body: String::new(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl F1DataProvider for RecordingProvider {
        async fn fetch_sessions(&self, query: &SessionQuery) -> f1_data::Result<Vec<Session>> {
            self.sessions.lock().unwrap().push(query.clone());
            self.check("sessions")?;
            Ok(Vec::new())
        }

        async fn fetch_drivers(&self, session_key: &SessionKey) -> f1_data::Result<Vec<Driver>> {
            self.drivers.lock().unwrap().push(*session_key);
            self.check("drivers")?;
            Ok(Vec::new())
        }

        async fn fetch_laps(
            &self,
            session_key: &SessionKey,
            driver_number: Option<u32>,
        ) -> f1_data::Result<Vec<Lap>> {
            self.laps.lock().unwrap().push((*session_key, driver_number));
            self.check("laps")?;
            Ok(Vec::new())
        }
    }

    fn dispatcher() -> (Arc<RecordingProvider>, Dispatcher) {
        let provider = Arc::new(RecordingProvider::default());
        (provider.clone(), Dispatcher::new(provider))
    }

    #[tokio::test]
    async fn test_unknown_function() {
        let (_, dispatcher) = dispatcher();
        let text = dispatcher.dispatch(&FunctionCall::new("get_weather")).await;
        assert_eq!(text, "Unknown function: get_weather");
    }

    #[tokio::test]
    async fn test_sessions_year_defaults_to_2025() {
        let (provider, dispatcher) = dispatcher();
        let text = dispatcher.dispatch(&FunctionCall::new("get_sessions")).await;

        assert_eq!(text, "No data returned from get_sessions");
        let queries = provider.sessions.lock().unwrap();
        assert_eq!(queries[0], SessionQuery::new(2025));
    }

    #[tokio::test]
    async fn test_sessions_configured_default_year_and_filters() {
        let provider = Arc::new(RecordingProvider::default());
        let dispatcher = Dispatcher::new(provider.clone()).with_default_year(2023);

        let call = FunctionCall::new("get_sessions")
            .with_arg("session_name", ArgValue::Str("Sprint".into()))
            .with_arg("country_name", ArgValue::Str("China".into()));
        dispatcher.dispatch(&call).await;

        let explicit = FunctionCall::new("get_sessions").with_arg("year", ArgValue::Str("2024".into()));
        dispatcher.dispatch(&explicit).await;

        let queries = provider.sessions.lock().unwrap();
        assert_eq!(
            queries[0],
            SessionQuery::new(2023)
                .with_session_name("Sprint")
                .with_country_name("China")
        );
        assert_eq!(queries[1].year, 2024);
    }

    #[tokio::test]
    async fn test_sessions_rejects_non_numeric_year() {
        let (provider, dispatcher) = dispatcher();
        let call = FunctionCall::new("get_sessions").with_arg("year", ArgValue::Str("last year".into()));
        let text = dispatcher.dispatch(&call).await;

        assert!(text.starts_with("Error calling get_sessions: invalid argument 'year'"));
        assert!(provider.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drivers_requires_session_key() {
        let (provider, dispatcher) = dispatcher();
        let text = dispatcher.dispatch(&FunctionCall::new("get_drivers")).await;

        assert_eq!(
            text,
            "Error calling get_drivers: missing required argument 'session_key'"
        );
        assert!(provider.drivers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_key_forms() {
        let (provider, dispatcher) = dispatcher();
        for value in [
            ArgValue::Str("latest".into()),
            ArgValue::Int(9158),
            ArgValue::Str("9161".into()),
        ] {
            let call = FunctionCall::new("get_drivers").with_arg("session_key", value);
            dispatcher.dispatch(&call).await;
        }

        let keys = provider.drivers.lock().unwrap();
        assert_eq!(
            *keys,
            vec![SessionKey::Latest, SessionKey::Id(9158), SessionKey::Id(9161)]
        );

        let bad = FunctionCall::new("get_drivers").with_arg("session_key", ArgValue::Bool(true));
        assert!(dispatcher.dispatch(&bad).await.starts_with("Error calling get_drivers:"));
    }

    #[tokio::test]
    async fn test_laps_driver_number_optional() {
        let (provider, dispatcher) = dispatcher();
        let all = FunctionCall::new("get_laps").with_arg("session_key", ArgValue::Int(9158));
        let one = all.clone().with_arg("driver_number", ArgValue::Int(63));

        dispatcher.dispatch(&all).await;
        dispatcher.dispatch(&one).await;

        let laps = provider.laps.lock().unwrap();
        assert_eq!(laps[0], (SessionKey::Id(9158), None));
        assert_eq!(laps[1], (SessionKey::Id(9158), Some(63)));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_text() {
        let provider = Arc::new(RecordingProvider {
            fail_with_status: Some(500),
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(provider);
        let call = FunctionCall::new("get_laps").with_arg("session_key", ArgValue::Str("latest".into()));

        assert_eq!(
            dispatcher.dispatch(&call).await,
            "Error calling get_laps: laps request failed with status 500"
        );
    }
}
