//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use f1_data::{Driver, F1DataProvider, Lap, Session, SessionKey, SessionQuery};
use llm::{ChatModel, ChatRequest, ChatResponse, LlmError, Message, ToolCall};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Reply = Box<dyn Fn(&ChatRequest, usize) -> llm::Result<ChatResponse> + Send + Sync>;

/// Mock LLM that answers through a closure and records every request.
pub struct MockChatModel {
    reply: Reply,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatModel {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&ChatRequest, usize) -> llm::Result<ChatResponse> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `texts` in order, then repeat the last one.
    pub fn scripted(texts: Vec<&str>) -> Self {
        let texts: Vec<String> = texts.into_iter().map(String::from).collect();
        Self::new(move |_, call| {
            let text = texts
                .get(call)
                .or_else(|| texts.last())
                .cloned()
                .unwrap_or_default();
            Ok(text_response(text))
        })
    }

    /// Always reply with the same text.
    pub fn repeating(text: &str) -> Self {
        Self::scripted(vec![text])
    }

    /// Always fail with the error built by `make_error`.
    pub fn failing<F>(make_error: F) -> Self
    where
        F: Fn() -> LlmError + Send + Sync + 'static,
    {
        Self::new(move |_, _| Err(make_error()))
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Messages sent on the last call.
    pub fn last_context(&self) -> Vec<Message> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn chat(&self, request: ChatRequest) -> llm::Result<ChatResponse> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.reply)(&request, call)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn text_response(text: impl Into<String>) -> ChatResponse {
    ChatResponse::new(Message::assistant(text))
}

pub fn tool_response(name: &str, arguments: serde_json::Value) -> ChatResponse {
    ChatResponse::new(
        Message::assistant("").with_tool_calls(vec![ToolCall::new("call_0", name, arguments)]),
    )
}

/// Text of the last message in a request.
pub fn last_text(request: &ChatRequest) -> String {
    request
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

/// In-memory provider with a fixed Bahrain 2024 data set.
#[derive(Default)]
pub struct FixtureProvider {
    pub session_queries: Mutex<Vec<SessionQuery>>,
    pub driver_queries: Mutex<Vec<SessionKey>>,
    pub lap_queries: Mutex<Vec<(SessionKey, Option<u32>)>>,
}

impl FixtureProvider {
    pub fn total_calls(&self) -> usize {
        self.session_queries.lock().unwrap().len()
            + self.driver_queries.lock().unwrap().len()
            + self.lap_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl F1DataProvider for FixtureProvider {
    async fn fetch_sessions(&self, query: &SessionQuery) -> f1_data::Result<Vec<Session>> {
        self.session_queries.lock().unwrap().push(query.clone());
        Ok(vec![bahrain_race()])
    }

    async fn fetch_drivers(&self, session_key: &SessionKey) -> f1_data::Result<Vec<Driver>> {
        self.driver_queries.lock().unwrap().push(*session_key);
        Ok(vec![
            driver(1, "Max VERSTAPPEN", "VER", "Max", "Verstappen", "Red Bull Racing"),
            driver(63, "George RUSSELL", "RUS", "George", "Russell", "Mercedes"),
        ])
    }

    async fn fetch_laps(
        &self,
        session_key: &SessionKey,
        driver_number: Option<u32>,
    ) -> f1_data::Result<Vec<Lap>> {
        self.lap_queries.lock().unwrap().push((*session_key, driver_number));
        let driver = driver_number.unwrap_or(63);
        Ok((7..=9).map(|n| lap(driver, n, 96.0 + f64::from(n) / 10.0)).collect())
    }
}

pub fn bahrain_race_json() -> serde_json::Value {
    json!({
        "circuit_key": 63,
        "circuit_short_name": "Sakhir",
        "country_code": "BRN",
        "country_key": 36,
        "country_name": "Bahrain",
        "date_end": "2024-03-02T17:00:00+00:00",
        "date_start": "2024-03-02T15:00:00+00:00",
        "gmt_offset": "03:00:00",
        "location": "Sakhir",
        "meeting_key": 1229,
        "session_key": 9472,
        "session_name": "Race",
        "session_type": "Race",
        "year": 2024
    })
}

pub fn bahrain_race() -> Session {
    serde_json::from_value(bahrain_race_json()).unwrap()
}

pub fn driver_json(
    number: u32,
    full_name: &str,
    acronym: &str,
    first: &str,
    last: &str,
    team: &str,
) -> serde_json::Value {
    json!({
        "broadcast_name": acronym,
        "country_code": null,
        "driver_number": number,
        "first_name": first,
        "full_name": full_name,
        "headshot_url": null,
        "last_name": last,
        "meeting_key": 1229,
        "name_acronym": acronym,
        "session_key": 9472,
        "team_colour": "3671C6",
        "team_name": team
    })
}

pub fn driver(number: u32, full_name: &str, acronym: &str, first: &str, last: &str, team: &str) -> Driver {
    serde_json::from_value(driver_json(number, full_name, acronym, first, last, team)).unwrap()
}

pub fn lap(driver_number: u32, lap_number: u32, duration: f64) -> Lap {
    serde_json::from_value(json!({
        "meeting_key": 1229,
        "session_key": 9472,
        "driver_number": driver_number,
        "lap_number": lap_number,
        "date_start": "2024-03-02T15:14:30.000000+00:00",
        "duration_sector_1": 31.4,
        "duration_sector_2": 42.1,
        "duration_sector_3": 22.9,
        "i1_speed": 301,
        "i2_speed": 268,
        "st_speed": 289,
        "is_pit_out_lap": false,
        "lap_duration": duration
    }))
    .unwrap()
}
