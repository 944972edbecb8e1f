//! Disabled date management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        disabled_date::{CreateDisabledDate, DisabledDateQuery, UpdateDisabledDate},
        DisabledDate,
    },
};

/// List disabled dates, optionally restricted to a date range
#[utoipa::path(
    get,
    path = "/disabled-dates",
    tag = "disabled-dates",
    params(DisabledDateQuery),
    responses(
        (status = 200, description = "Disabled date records", body = Vec<DisabledDate>),
        (status = 400, description = "Malformed or half-set range")
    )
)]
pub async fn list_disabled_dates(
    State(state): State<crate::AppState>,
    Query(query): Query<DisabledDateQuery>,
) -> AppResult<Json<Vec<DisabledDate>>> {
    let records = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (None, None) => state.services.availability.list().await?,
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            state.services.availability.list_range(start, end).await?
        }
        _ => {
            return Err(AppError::Validation(
                "start_date and end_date must be provided together".to_string(),
            ))
        }
    };
    Ok(Json(records))
}

/// Get a disabled date by id
#[utoipa::path(
    get,
    path = "/disabled-dates/{id}",
    tag = "disabled-dates",
    params(
        ("id" = Uuid, Path, description = "Disabled date ID")
    ),
    responses(
        (status = 200, description = "The record", body = DisabledDate),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_disabled_date(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DisabledDate>> {
    let record = state.services.availability.get(id).await?;
    Ok(Json(record))
}

/// Block a date, wholly or for a time range
#[utoipa::path(
    post,
    path = "/disabled-dates",
    tag = "disabled-dates",
    request_body = CreateDisabledDate,
    responses(
        (status = 201, description = "Record created", body = DisabledDate),
        (status = 400, description = "Half-set or inverted time range")
    )
)]
pub async fn create_disabled_date(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateDisabledDate>,
) -> AppResult<(StatusCode, Json<DisabledDate>)> {
    let record = state.services.availability.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a disabled date record
#[utoipa::path(
    put,
    path = "/disabled-dates/{id}",
    tag = "disabled-dates",
    params(
        ("id" = Uuid, Path, description = "Disabled date ID")
    ),
    request_body = UpdateDisabledDate,
    responses(
        (status = 200, description = "Record updated", body = DisabledDate),
        (status = 400, description = "Half-set or inverted time range"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn update_disabled_date(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDisabledDate>,
) -> AppResult<Json<DisabledDate>> {
    let record = state.services.availability.update(id, request).await?;
    Ok(Json(record))
}

/// Delete a disabled date record
#[utoipa::path(
    delete,
    path = "/disabled-dates/{id}",
    tag = "disabled-dates",
    params(
        ("id" = Uuid, Path, description = "Disabled date ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_disabled_date(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.availability.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {} (use YYYY-MM-DD)", value)))
}
