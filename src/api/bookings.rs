//! Booking management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Booking, BookingFilter, BookingStatus, NewBooking, UpdateBooking},
    phone::{normalize_api_phone, normalize_form_phone},
};

/// Create or update booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    /// Main visitor full name
    pub main_visitor_name: String,
    /// Main visitor phone number, stored digits-only
    pub main_visitor_phone: String,
    /// Party size
    #[validate(range(min = 1, message = "Number of guests must be at least 1"))]
    pub visitors_count: i32,
    /// Booking date and time (ISO 8601, seconds optional)
    pub date_time: String,
    /// Table identifier; "-1" when not assigned
    pub table_id: Option<String>,
    pub notes: Option<String>,
}

/// Public booking form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingIntakeForm {
    /// Visitor full name
    pub main_visitor_name: String,
    /// Visitor phone number in any common local format
    pub main_visitor_phone: String,
    /// Party size
    #[validate(range(min = 1, message = "Number of guests must be at least 1"))]
    pub visitors_count: i32,
    /// Requested date and time (DD.MM.YYYY, HH:MM)
    pub date_time: String,
    pub table_id: Option<String>,
    pub notes: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingStatusUpdate {
    /// New status wire label
    pub status: BookingStatus,
}

/// One page of booking history
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingHistoryResponse {
    pub items: Vec<Booking>,
    /// Zero-based page actually served
    pub page: usize,
    pub total_pages: usize,
}

/// Query parameters for the triage queue
#[derive(Debug, Deserialize, IntoParams)]
pub struct QueueQuery {
    /// Keep only bookings on this date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Query parameters for a single day's bookings
#[derive(Debug, Deserialize, IntoParams)]
pub struct DayQuery {
    /// Date to list (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Case-insensitive substring match on the visitor name
    pub visitor_name: Option<String>,
    /// Substring match on the phone number
    pub visitor_phone: Option<String>,
    /// Exact table match
    pub table_id: Option<String>,
}

/// Query parameters for booking history
#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Range start (YYYY-MM-DD); defaults to one month ago
    pub start_date: Option<String>,
    /// Range end (YYYY-MM-DD); defaults to today
    pub end_date: Option<String>,
    pub visitor_name: Option<String>,
    pub visitor_phone: Option<String>,
    /// Zero-based page of ten
    pub page: Option<usize>,
}

/// History pages are ten bookings wide
const HISTORY_PAGE_SIZE: usize = 10;

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "All bookings ordered by date", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list_all().await?;
    Ok(Json(bookings))
}

/// Get a booking by id
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "The booking", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// List bookings in a given status
#[utoipa::path(
    get,
    path = "/bookings/status/{status}",
    tag = "bookings",
    params(
        ("status" = String, Path, description = "Status wire label, e.g. WAIT_LIST")
    ),
    responses(
        (status = 200, description = "Bookings in the status", body = Vec<Booking>),
        (status = 400, description = "Unknown status label")
    )
)]
pub async fn get_bookings_by_status(
    State(state): State<crate::AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Booking>>> {
    let status: BookingStatus = status.parse().map_err(AppError::Validation)?;
    let bookings = state.services.bookings.by_status(status).await?;
    Ok(Json(bookings))
}

/// The staff triage queue: pending, wait list and call-again bookings,
/// oldest first
#[utoipa::path(
    get,
    path = "/bookings/queue",
    tag = "bookings",
    params(QueueQuery),
    responses(
        (status = 200, description = "Bookings awaiting a decision", body = Vec<Booking>)
    )
)]
pub async fn get_booking_queue(
    State(state): State<crate::AppState>,
    Query(query): Query<QueueQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let mut queue = state.services.bookings.pending_queue().await?;

    if let Some(value) = query.date.as_deref() {
        let date = parse_date(value)?;
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let day_end = day_start + Duration::days(1);
        queue.retain(|b| b.date_time >= day_start && b.date_time < day_end);
    }

    Ok(Json(queue))
}

/// Today's confirmed bookings
#[utoipa::path(
    get,
    path = "/bookings/today",
    tag = "bookings",
    responses(
        (status = 200, description = "Confirmed bookings for today", body = Vec<Booking>)
    )
)]
pub async fn get_today_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.today_confirmed().await?;
    Ok(Json(bookings))
}

/// Bookings for a single day with optional visitor and table filters
#[utoipa::path(
    get,
    path = "/bookings/day",
    tag = "bookings",
    params(DayQuery),
    responses(
        (status = 200, description = "Bookings on the date", body = Vec<Booking>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn get_bookings_for_day(
    State(state): State<crate::AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let date = match query.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };

    let filter = BookingFilter {
        visitor_name: query.visitor_name,
        visitor_phone: query.visitor_phone,
    };
    let mut bookings = state.services.bookings.by_date(date, &filter).await?;

    if let Some(table_id) = query.table_id.as_deref().filter(|t| !t.is_empty()) {
        bookings.retain(|b| b.table_id == table_id);
    }

    Ok(Json(bookings))
}

/// Booking history over a date range, newest first, paginated
#[utoipa::path(
    get,
    path = "/bookings/history",
    tag = "bookings",
    params(HistoryQuery),
    responses(
        (status = 200, description = "One page of history", body = BookingHistoryResponse),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn get_booking_history(
    State(state): State<crate::AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<BookingHistoryResponse>> {
    let today = Local::now().date_naive();
    let start = match query.start_date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today.checked_sub_months(Months::new(1)).unwrap_or(today),
    };
    let end = match query.end_date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today,
    };

    let filter = BookingFilter {
        visitor_name: query.visitor_name,
        visitor_phone: query.visitor_phone,
    };
    let all = state.services.bookings.by_date_range(start, end, &filter).await?;

    let total_pages = (all.len() + HISTORY_PAGE_SIZE - 1) / HISTORY_PAGE_SIZE;
    let page = query.page.unwrap_or(0).min(total_pages.saturating_sub(1));
    let items = all
        .into_iter()
        .skip(page * HISTORY_PAGE_SIZE)
        .take(HISTORY_PAGE_SIZE)
        .collect();

    Ok(Json(BookingHistoryResponse {
        items,
        page,
        total_pages,
    }))
}

/// Create a new booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid booking time or malformed request")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let date_time = parse_date_time(&request.date_time)?;

    let draft = NewBooking {
        main_visitor_name: request.main_visitor_name,
        main_visitor_phone: normalize_api_phone(&request.main_visitor_phone),
        visitors_count: request.visitors_count,
        date_time,
        table_id: request.table_id.unwrap_or_else(|| "-1".to_string()),
        notes: request.notes,
    };

    let booking = state.services.bookings.create(draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Public booking form intake
///
/// Accepts an urlencoded submission from the booking website and
/// normalizes the phone into the local `8XXXXXXXXXX` form.
#[utoipa::path(
    post,
    path = "/bookings/request",
    tag = "bookings",
    request_body(
        content = BookingIntakeForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Missing fields or invalid booking time")
    )
)]
pub async fn create_booking_request(
    State(state): State<crate::AppState>,
    Form(form): Form<BookingIntakeForm>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    if form.main_visitor_name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if form.main_visitor_phone.trim().is_empty() {
        return Err(AppError::Validation("Phone number is required".to_string()));
    }
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let date_time = parse_form_date_time(&form.date_time)?;

    let draft = NewBooking {
        main_visitor_name: form.main_visitor_name,
        main_visitor_phone: normalize_form_phone(&form.main_visitor_phone),
        visitors_count: form.visitors_count,
        date_time,
        table_id: form.table_id.unwrap_or_else(|| "-1".to_string()),
        notes: form.notes,
    };

    let booking = state.services.bookings.create(draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Update a booking; the stored status is preserved
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 400, description = "Invalid booking time or malformed request"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<BookingRequest>,
) -> AppResult<Json<Booking>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let date_time = parse_date_time(&request.date_time)?;

    let booking = state
        .services
        .bookings
        .update(
            id,
            UpdateBooking {
                status: None,
                main_visitor_name: request.main_visitor_name,
                main_visitor_phone: normalize_api_phone(&request.main_visitor_phone),
                visitors_count: request.visitors_count,
                date_time,
                table_id: request.table_id.unwrap_or_else(|| "-1".to_string()),
                notes: request.notes,
            },
        )
        .await?;
    Ok(Json(booking))
}

/// Move a booking to a new status
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = BookingStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<BookingStatusUpdate>,
) -> AppResult<Json<Booking>> {
    let booking = match request.status {
        BookingStatus::Confirmed => state.services.bookings.confirm(id).await?,
        BookingStatus::Declined => state.services.bookings.decline(id).await?,
        BookingStatus::WaitList => state.services.bookings.wait_list(id).await?,
        BookingStatus::CallAgain => state.services.bookings.call_again(id).await?,
        BookingStatus::Pending => {
            let existing = state.services.bookings.get(id).await?;
            state
                .services
                .bookings
                .update(
                    id,
                    UpdateBooking {
                        status: Some(BookingStatus::Pending),
                        main_visitor_name: existing.main_visitor_name,
                        main_visitor_phone: existing.main_visitor_phone,
                        visitors_count: existing.visitors_count,
                        date_time: existing.date_time,
                        table_id: existing.table_id,
                        notes: existing.notes,
                    },
                )
                .await?
        }
    };
    Ok(Json(booking))
}

/// Confirm a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/confirm",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking confirmed", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.confirm(id).await?;
    Ok(Json(booking))
}

/// Decline a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/decline",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking declined", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn decline_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.decline(id).await?;
    Ok(Json(booking))
}

/// Move a booking to the wait list
#[utoipa::path(
    post,
    path = "/bookings/{id}/waitlist",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking moved to wait list", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn wait_list_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.wait_list(id).await?;
    Ok(Json(booking))
}

/// Mark a booking to be called again
#[utoipa::path(
    post,
    path = "/bookings/{id}/callagain",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking marked call again", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn call_again_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.call_again(id).await?;
    Ok(Json(booking))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// ISO datetime, with or without seconds
fn parse_date_time(value: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::Validation(format!("Invalid date_time: {}", value)))
}

/// The format the public booking form posts
fn parse_form_date_time(value: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%d.%m.%Y, %H:%M").map_err(|_| {
        AppError::Validation(format!(
            "Invalid date_time: {} (use DD.MM.YYYY, HH:MM)",
            value
        ))
    })
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {} (use YYYY-MM-DD)", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_date_time_accepts_seconds_and_minutes_precision() {
        assert!(parse_date_time("2026-03-14T19:30:00").is_ok());
        assert!(parse_date_time("2026-03-14T19:30").is_ok());
        assert!(parse_date_time("14.03.2026, 19:30").is_err());
    }

    #[test]
    fn form_date_time_uses_the_website_format() {
        let parsed = parse_form_date_time("14.03.2026, 19:30").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap()
        );
        assert!(parse_form_date_time("2026-03-14T19:30").is_err());
    }
}
