//! Typed OpenF1 entities.
//!
//! Field names match the provider's JSON keys one-to-one so records
//! deserialize directly. Fields the provider may omit or null are `Option`;
//! every other field is required and its absence is a malformed record.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One on-track event of a race weekend (practice, qualifying, sprint, race).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_key: u32,
    pub meeting_key: u32,
    pub location: String,
    pub country_name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_key: Option<u32>,
    #[serde(default)]
    pub circuit_key: Option<u32>,
    #[serde(default)]
    pub circuit_short_name: Option<String>,
    /// Coarse category: "Race", "Qualifying", "Practice".
    pub session_type: String,
    /// Finer label, e.g. "Sprint" or "Sprint Qualifying" under type "Race".
    pub session_name: String,
    pub date_start: String,
    pub date_end: String,
    #[serde(default)]
    pub gmt_offset: Option<String>,
    pub year: i32,
}

impl Session {
    /// Parsed start timestamp.
    pub fn start_time(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.date_start)
    }

    /// Parsed end timestamp.
    pub fn end_time(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.date_end)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) - {}",
            self.session_name, self.location, self.session_type, self.date_start
        )
    }
}

/// A competitor within one session. `driver_number` is only unique per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_number: u32,
    pub session_key: u32,
    pub meeting_key: u32,
    pub full_name: String,
    pub name_acronym: String,
    #[serde(default)]
    pub broadcast_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    /// Hex colour without the leading `#`.
    #[serde(default)]
    pub team_colour: Option<String>,
    #[serde(default)]
    pub headshot_url: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Driver {
    /// Team colour as a CSS hex code.
    pub fn team_colour_hex(&self) -> Option<String> {
        self.team_colour.as_ref().map(|c| format!("#{}", c))
    }

    /// "First Last" when both parts are known, otherwise the full name.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.full_name.clone(),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}) - {}",
            self.driver_number,
            self.full_name,
            self.name_acronym,
            self.team_name.as_deref().unwrap_or("N/A")
        )
    }
}

/// One timed lap by one driver in one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    pub meeting_key: u32,
    pub session_key: u32,
    pub driver_number: u32,
    pub lap_number: u32,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub duration_sector_1: Option<f64>,
    #[serde(default)]
    pub duration_sector_2: Option<f64>,
    #[serde(default)]
    pub duration_sector_3: Option<f64>,
    #[serde(default)]
    pub i1_speed: Option<u32>,
    #[serde(default)]
    pub i2_speed: Option<u32>,
    #[serde(default)]
    pub st_speed: Option<u32>,
    pub is_pit_out_lap: bool,
    /// Null for invalidated or unfinished laps, even when sectors are present.
    #[serde(default)]
    pub lap_duration: Option<f64>,
    #[serde(default)]
    pub segments_sector_1: Option<Vec<Option<u32>>>,
    #[serde(default)]
    pub segments_sector_2: Option<Vec<Option<u32>>>,
    #[serde(default)]
    pub segments_sector_3: Option<Vec<Option<u32>>>,
}

impl Lap {
    /// A lap is complete when all three sector durations are present.
    pub fn is_complete(&self) -> bool {
        self.duration_sector_1.is_some()
            && self.duration_sector_2.is_some()
            && self.duration_sector_3.is_some()
    }

    pub fn sector_times(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        (
            self.duration_sector_1,
            self.duration_sector_2,
            self.duration_sector_3,
        )
    }

    /// Speed trap readings as (intermediate 1, intermediate 2, speed trap).
    pub fn speeds(&self) -> (Option<u32>, Option<u32>, Option<u32>) {
        (self.i1_speed, self.i2_speed, self.st_speed)
    }

    /// Mean of the speed readings that are present.
    pub fn average_speed(&self) -> Option<f64> {
        let readings: Vec<u32> = [self.i1_speed, self.i2_speed, self.st_speed]
            .into_iter()
            .flatten()
            .collect();

        if readings.is_empty() {
            return None;
        }

        let total: u32 = readings.iter().sum();
        Some(total as f64 / readings.len() as f64)
    }

    pub fn start_time(&self) -> Option<Result<DateTime<FixedOffset>, chrono::ParseError>> {
        self.date_start
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
    }
}

impl fmt::Display for Lap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lap_duration {
            Some(duration) => write!(
                f,
                "Lap #{} - Driver #{} - {:.3}s",
                self.lap_number, self.driver_number, duration
            ),
            None => write!(
                f,
                "Lap #{} - Driver #{} - N/A",
                self.lap_number, self.driver_number
            ),
        }
    }
}
