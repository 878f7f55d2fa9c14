//! Rendering of function results as model-readable text.
//!
//! Results become `Found N <noun>: <json>` where the JSON array carries only
//! the fields the model needs. Output is deterministic for a given input.

use crate::functions::FunctionName;
use f1_data::{Driver, Lap, Session};
use serde::Serialize;
use std::fmt;

/// Records returned by one of the data functions.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionResult {
    Sessions(Vec<Session>),
    Drivers(Vec<Driver>),
    Laps(Vec<Lap>),
}

impl FunctionResult {
    pub fn len(&self) -> usize {
        match self {
            FunctionResult::Sessions(items) => items.len(),
            FunctionResult::Drivers(items) => items.len(),
            FunctionResult::Laps(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn noun(&self) -> &'static str {
        match self {
            FunctionResult::Sessions(_) => "sessions",
            FunctionResult::Drivers(_) => "drivers",
            FunctionResult::Laps(_) => "laps",
        }
    }

    fn produced_by(&self) -> FunctionName {
        match self {
            FunctionResult::Sessions(_) => FunctionName::GetSessions,
            FunctionResult::Drivers(_) => FunctionName::GetDrivers,
            FunctionResult::Laps(_) => FunctionName::GetLaps,
        }
    }
}

fn write_lines<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for FunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionResult::Sessions(items) => write_lines(f, items),
            FunctionResult::Drivers(items) => write_lines(f, items),
            FunctionResult::Laps(items) => write_lines(f, items),
        }
    }
}

#[derive(Serialize)]
struct SessionSummary<'a> {
    session_key: u32,
    session_name: &'a str,
    location: &'a str,
    country_name: &'a str,
    session_type: &'a str,
    date_start: &'a str,
}

impl<'a> From<&'a Session> for SessionSummary<'a> {
    fn from(s: &'a Session) -> Self {
        Self {
            session_key: s.session_key,
            session_name: &s.session_name,
            location: &s.location,
            country_name: &s.country_name,
            session_type: &s.session_type,
            date_start: &s.date_start,
        }
    }
}

#[derive(Serialize)]
struct DriverSummary<'a> {
    driver_number: u32,
    full_name: &'a str,
    name_acronym: &'a str,
    team_name: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
}

impl<'a> From<&'a Driver> for DriverSummary<'a> {
    fn from(d: &'a Driver) -> Self {
        Self {
            driver_number: d.driver_number,
            full_name: &d.full_name,
            name_acronym: &d.name_acronym,
            team_name: d.team_name.as_deref(),
            first_name: d.first_name.as_deref(),
            last_name: d.last_name.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct LapSummary {
    lap_number: u32,
    driver_number: u32,
    lap_duration: Option<f64>,
    duration_sector_1: Option<f64>,
    duration_sector_2: Option<f64>,
    duration_sector_3: Option<f64>,
    is_pit_out_lap: bool,
}

impl From<&Lap> for LapSummary {
    fn from(l: &Lap) -> Self {
        Self {
            lap_number: l.lap_number,
            driver_number: l.driver_number,
            lap_duration: l.lap_duration,
            duration_sector_1: l.duration_sector_1,
            duration_sector_2: l.duration_sector_2,
            duration_sector_3: l.duration_sector_3,
            is_pit_out_lap: l.is_pit_out_lap,
        }
    }
}

fn summarize<'a, T, S>(items: &'a [T], limit: usize) -> serde_json::Result<String>
where
    S: Serialize + From<&'a T>,
{
    let rows: Vec<S> = items.iter().take(limit).map(S::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// Turns function results into text for the model's context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter {
    max_records: Option<usize>,
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render at most `max_records` records per result.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Format `result` as returned by the function called `name`.
    ///
    /// A missing or empty result gives `No data returned from <name>`. A
    /// result that does not belong to `name` is rendered line by line.
    pub fn format(&self, name: &str, result: Option<&FunctionResult>) -> String {
        let result = match result {
            Some(result) if !result.is_empty() => result,
            _ => return format!("No data returned from {}", name),
        };

        if name.parse::<FunctionName>().ok() != Some(result.produced_by()) {
            return result.to_string();
        }

        let total = result.len();
        let shown = self.max_records.map_or(total, |cap| cap.min(total));

        let json = match result {
            FunctionResult::Sessions(items) => summarize::<_, SessionSummary>(items, shown),
            FunctionResult::Drivers(items) => summarize::<_, DriverSummary>(items, shown),
            FunctionResult::Laps(items) => summarize::<_, LapSummary>(items, shown),
        };

        let json = match json {
            Ok(json) => json,
            Err(_) => return result.to_string(),
        };

        if shown < total {
            format!(
                "Found {} {} (showing first {}): {}",
                total,
                result.noun(),
                shown,
                json
            )
        } else {
            format!("Found {} {}: {}", total, result.noun(), json)
        }
    }
}
