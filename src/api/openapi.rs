//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, disabled_dates, health, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resa API",
        version = "0.9.0",
        description = "Restaurant booking administration REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::get_bookings_by_status,
        bookings::get_booking_queue,
        bookings::get_today_bookings,
        bookings::get_bookings_for_day,
        bookings::get_booking_history,
        bookings::create_booking,
        bookings::create_booking_request,
        bookings::update_booking,
        bookings::update_booking_status,
        bookings::confirm_booking,
        bookings::decline_booking,
        bookings::wait_list_booking,
        bookings::call_again_booking,
        bookings::delete_booking,
        // Visitors
        visitors::list_visitors,
        visitors::get_visitor,
        visitors::create_visitor,
        visitors::update_visitor,
        visitors::delete_visitor,
        visitors::list_guests,
        visitors::list_guest_bookings,
        // Disabled dates
        disabled_dates::list_disabled_dates,
        disabled_dates::get_disabled_date,
        disabled_dates::create_disabled_date,
        disabled_dates::update_disabled_date,
        disabled_dates::delete_disabled_date,
        // Availability
        availability::check_date,
        availability::check_slot,
        availability::list_disabled_slots,
    ),
    components(
        schemas(
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingStatus,
            bookings::BookingRequest,
            bookings::BookingIntakeForm,
            bookings::BookingStatusUpdate,
            bookings::BookingHistoryResponse,
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::GuestRecord,
            crate::models::visitor::GuestVisit,
            visitors::VisitorRequest,
            visitors::GuestListResponse,
            // Disabled dates
            crate::models::disabled_date::DisabledDate,
            crate::models::disabled_date::CreateDisabledDate,
            crate::models::disabled_date::UpdateDisabledDate,
            // Availability
            availability::AvailabilityCheck,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Booking lifecycle and queries"),
        (name = "visitors", description = "Visitor directory and guest list"),
        (name = "disabled-dates", description = "Blocked booking dates"),
        (name = "availability", description = "Availability checks for the booking website")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
