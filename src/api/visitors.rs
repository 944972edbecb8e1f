//! Visitor directory and guest list endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{GuestRecord, GuestVisit, NewVisitor, UpdateVisitor, Visitor},
    services::visitors::GUEST_PAGE_SIZE,
};

/// Create or update visitor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct VisitorRequest {
    /// Phone number, the visitor's identity
    pub phone_number: String,
    pub name: String,
    pub notes: Option<String>,
}

/// One page of the guest directory
#[derive(Debug, Serialize, ToSchema)]
pub struct GuestListResponse {
    pub items: Vec<GuestRecord>,
    /// Zero-based page actually served
    pub page: i64,
    pub total_pages: i64,
    /// Total number of guests
    pub total: i64,
}

/// Query parameters for the guest directory
#[derive(Debug, Deserialize, IntoParams)]
pub struct GuestsQuery {
    /// Zero-based page of twenty
    pub page: Option<i64>,
}

/// Query parameters for a guest's booking history
#[derive(Debug, Deserialize, IntoParams)]
pub struct GuestBookingsQuery {
    /// Phone number as stored on the visitor
    pub phone_number: Option<String>,
}

/// List all visitors
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    responses(
        (status = 200, description = "All visitors ordered by name", body = Vec<Visitor>)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Visitor>>> {
    let visitors = state.services.visitors.list().await?;
    Ok(Json(visitors))
}

/// Get a visitor by id
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    params(
        ("id" = Uuid, Path, description = "Visitor ID")
    ),
    responses(
        (status = 200, description = "The visitor", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.get(id).await?;
    Ok(Json(visitor))
}

/// Create a visitor
///
/// If the phone number is already known the existing visitor is
/// returned instead of creating a duplicate.
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = VisitorRequest,
    responses(
        (status = 201, description = "Visitor created or already present", body = Visitor)
    )
)]
pub async fn create_visitor(
    State(state): State<crate::AppState>,
    Json(request): Json<VisitorRequest>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    let visitor = state
        .services
        .visitors
        .create(NewVisitor {
            phone_number: request.phone_number,
            name: request.name,
            notes: request.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Update a visitor
#[utoipa::path(
    put,
    path = "/visitors/{id}",
    tag = "visitors",
    params(
        ("id" = Uuid, Path, description = "Visitor ID")
    ),
    request_body = VisitorRequest,
    responses(
        (status = 200, description = "Visitor updated", body = Visitor),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Phone number taken by another visitor")
    )
)]
pub async fn update_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VisitorRequest>,
) -> AppResult<Json<Visitor>> {
    let visitor = state
        .services
        .visitors
        .update(
            id,
            UpdateVisitor {
                phone_number: request.phone_number,
                name: request.name,
                notes: request.notes,
            },
        )
        .await?;
    Ok(Json(visitor))
}

/// Delete a visitor
#[utoipa::path(
    delete,
    path = "/visitors/{id}",
    tag = "visitors",
    params(
        ("id" = Uuid, Path, description = "Visitor ID")
    ),
    responses(
        (status = 204, description = "Visitor deleted"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.visitors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The guest directory: visitors with confirmed bookings, most
/// confirmed bookings first
#[utoipa::path(
    get,
    path = "/visitors/guests",
    tag = "visitors",
    params(GuestsQuery),
    responses(
        (status = 200, description = "One page of guests", body = GuestListResponse)
    )
)]
pub async fn list_guests(
    State(state): State<crate::AppState>,
    Query(query): Query<GuestsQuery>,
) -> AppResult<Json<GuestListResponse>> {
    let page = query.page.unwrap_or(0).max(0);
    let (items, total) = state.services.visitors.guests(page).await?;
    let total_pages = (total + GUEST_PAGE_SIZE - 1) / GUEST_PAGE_SIZE;

    Ok(Json(GuestListResponse {
        items,
        page,
        total_pages,
        total,
    }))
}

/// Confirmed visits for one guest, newest first
#[utoipa::path(
    get,
    path = "/visitors/guests/bookings",
    tag = "visitors",
    params(GuestBookingsQuery),
    responses(
        (status = 200, description = "The guest's confirmed visits", body = Vec<GuestVisit>),
        (status = 400, description = "Missing phone number")
    )
)]
pub async fn list_guest_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<GuestBookingsQuery>,
) -> AppResult<Json<Vec<GuestVisit>>> {
    let phone = query
        .phone_number
        .as_deref()
        .ok_or_else(|| AppError::Validation("phone_number is required".to_string()))?;

    let visits = state.services.visitors.guest_history(phone).await?;
    Ok(Json(visits))
}
