//! Day Routes
//!
//! The focus-plot page and the day/hour data endpoints.
//!
//! - GET /       - HTML page for today
//! - GET /data   - HTML fragment for a requested day
//! - GET /api/v1/day   - JSON day
//! - GET /api/v1/hour  - JSON single hour
//! - PUT /api/v1/hour  - record one hour's level

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::api::dto::{
    DateQuery, DayResponse, HourQuery, HourResponse, HourSlot, LogRequest, LogResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::ui;
use crate::store::{FocusStore, Level, StoreError, HOURS_PER_DAY};

/// GET /
///
/// Full HTML page showing today's hourly levels.
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let today = Local::now().date_naive();
    let levels = day_or_empty(&state.store, today)?;
    Ok(Html(ui::page(today, &levels)))
}

/// GET /data?date=YYYY-MM-DD
///
/// HTML fragment for the requested day. A date with no record renders
/// as an all-`None` row rather than failing the page.
pub async fn data_fragment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Html<String>> {
    let date = resolve_date(query.date.as_deref())?;
    let levels = day_or_empty(&state.store, date)?;
    Ok(Html(ui::day_table(date, &levels)))
}

/// GET /api/v1/day?date=YYYY-MM-DD
pub async fn get_day(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DayResponse>> {
    let date = resolve_date(query.date.as_deref())?;
    let levels = day_or_empty(&state.store, date)?;

    let hours = levels
        .iter()
        .enumerate()
        .map(|(hour, &level)| HourSlot::new(hour as u8, level))
        .collect();

    Ok(Json(DayResponse { date, hours }))
}

/// GET /api/v1/hour?date=YYYY-MM-DD&hour=H
pub async fn get_hour(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HourQuery>,
) -> ApiResult<Json<HourResponse>> {
    let date = resolve_date(query.date.as_deref())?;

    let level = match state.store.read_hour(date, query.hour) {
        Ok(level) => level,
        Err(StoreError::NotFound(_)) => Level::None,
        Err(e) => return Err(e.into()),
    };

    Ok(Json(HourResponse {
        date,
        hour: query.hour,
        level,
        label: level.to_string(),
    }))
}

/// PUT /api/v1/hour
///
/// Record the level for one hour of a day (default: today).
pub async fn put_hour(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogRequest>,
) -> ApiResult<(StatusCode, Json<LogResponse>)> {
    let date = req.date.unwrap_or_else(|| Local::now().date_naive());
    let level = Level::try_from(req.level)
        .map_err(|_| ApiError::Validation(format!("level must be 0-5, got {}", req.level)))?;

    state.store.write_hour(date, req.hour, level)?;

    Ok((
        StatusCode::CREATED,
        Json(LogResponse {
            status: "ok".to_string(),
            date,
            hour: req.hour,
            level,
        }),
    ))
}

/// Parse an optional ISO `?date=` parameter, defaulting to today
fn resolve_date(raw: Option<&str>) -> ApiResult<NaiveDate> {
    match raw {
        None | Some("") => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| ApiError::Validation(format!("invalid date {s:?}: {e}"))),
    }
}

/// Read a full day, rendering a missing record as an all-`None` row.
/// Future dates and corruption still surface as errors.
fn day_or_empty(store: &FocusStore, date: NaiveDate) -> ApiResult<[Level; HOURS_PER_DAY]> {
    match store.read_day(date) {
        Ok(levels) => Ok(levels),
        Err(StoreError::NotFound(_)) => Ok([Level::None; HOURS_PER_DAY]),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_date() {
        let date = resolve_date(Some("2025-01-21")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 21).unwrap());

        assert_eq!(resolve_date(None).unwrap(), Local::now().date_naive());
        assert!(resolve_date(Some("21.01.2025")).is_err());
    }
}
