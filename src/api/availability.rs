//! Availability check endpoints for the booking website

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Result of an availability check
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityCheck {
    /// Whether the date or slot is blocked for booking
    pub disabled: bool,
}

/// Query parameters for a slot check
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotQuery {
    /// Date and time to check (ISO 8601, seconds optional)
    pub at: Option<String>,
}

/// Query parameters for listing blocked slots
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotRangeQuery {
    /// Range start (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Range end (YYYY-MM-DD), inclusive
    pub end_date: Option<String>,
}

/// Check whether a whole date is blocked
#[utoipa::path(
    get,
    path = "/availability/date/{date}",
    tag = "availability",
    params(
        ("date" = String, Path, description = "Date to check (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Check result", body = AvailabilityCheck),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn check_date(
    State(state): State<crate::AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<AvailabilityCheck>> {
    let date = parse_date(&date)?;
    let disabled = state.services.availability.is_date_disabled(date).await?;
    Ok(Json(AvailabilityCheck { disabled }))
}

/// Check whether a specific slot is blocked
#[utoipa::path(
    get,
    path = "/availability/slot",
    tag = "availability",
    params(SlotQuery),
    responses(
        (status = 200, description = "Check result", body = AvailabilityCheck),
        (status = 400, description = "Missing or malformed datetime")
    )
)]
pub async fn check_slot(
    State(state): State<crate::AppState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<AvailabilityCheck>> {
    let at = query
        .at
        .as_deref()
        .ok_or_else(|| AppError::Validation("at is required".to_string()))?;
    let date_time = parse_date_time(at)?;

    let disabled = state
        .services
        .availability
        .is_date_time_disabled(date_time)
        .await?;
    Ok(Json(AvailabilityCheck { disabled }))
}

/// All blocked half-hour slots in a date range
///
/// Recurring rules are projected onto each matching date; the list may
/// contain repeats.
#[utoipa::path(
    get,
    path = "/availability/disabled-slots",
    tag = "availability",
    params(SlotRangeQuery),
    responses(
        (status = 200, description = "Blocked slots", body = Vec<NaiveDateTime>),
        (status = 400, description = "Missing or malformed range")
    )
)]
pub async fn list_disabled_slots(
    State(state): State<crate::AppState>,
    Query(query): Query<SlotRangeQuery>,
) -> AppResult<Json<Vec<NaiveDateTime>>> {
    let start = query
        .start_date
        .as_deref()
        .ok_or_else(|| AppError::Validation("start_date is required".to_string()))?;
    let end = query
        .end_date
        .as_deref()
        .ok_or_else(|| AppError::Validation("end_date is required".to_string()))?;

    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let slots = state.services.availability.disabled_slots(start, end).await?;
    Ok(Json(slots))
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {} (use YYYY-MM-DD)", value)))
}

/// ISO datetime, with or without seconds
fn parse_date_time(value: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::Validation(format!("Invalid datetime: {}", value)))
}
