//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::store::Level;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query parameters carrying an optional ISO date (`?date=2025-01-21`)
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Query parameters selecting a single hour of a day
#[derive(Debug, Deserialize)]
pub struct HourQuery {
    pub date: Option<String>,
    pub hour: u8,
}

/// One hourly slot of a day
#[derive(Debug, Serialize)]
pub struct HourSlot {
    pub hour: u8,
    pub level: Level,
    /// Human-readable level name ("Very low", "Flow", ...)
    pub label: String,
}

impl HourSlot {
    pub fn new(hour: u8, level: Level) -> Self {
        Self {
            hour,
            level,
            label: level.to_string(),
        }
    }
}

/// Full day response: 24 hourly slots
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub hours: Vec<HourSlot>,
}

/// Single hour response
#[derive(Debug, Serialize)]
pub struct HourResponse {
    pub date: NaiveDate,
    pub hour: u8,
    pub level: Level,
    pub label: String,
}

/// Record one hour's level
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    /// ISO date, defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub hour: u8,
    /// Level ordinal 0-5
    pub level: u8,
}

/// Response after recording a level
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub status: String,
    pub date: NaiveDate,
    pub hour: u8,
    pub level: Level,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub records: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
