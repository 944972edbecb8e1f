//! Booking model and status lifecycle

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking triage status
///
/// Every transition is allowed from every status; staff move bookings
/// freely between states while working the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Declined,
    WaitList,
    CallAgain,
}

impl BookingStatus {
    /// Wire label, also the value stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Declined => "DECLINED",
            BookingStatus::WaitList => "WAIT_LIST",
            BookingStatus::CallAgain => "CALL_AGAIN",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "DECLINED" => Ok(BookingStatus::Declined),
            "WAIT_LIST" => Ok(BookingStatus::WaitList),
            "CALL_AGAIN" => Ok(BookingStatus::CallAgain),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// A table booking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub status: BookingStatus,
    /// Name of the visitor who placed the booking
    pub main_visitor_name: String,
    /// Normalized phone number (digits only)
    pub main_visitor_phone: String,
    /// Party size, at least 1
    pub visitors_count: i32,
    /// Requested date and time, local wall clock, half-hour aligned
    pub date_time: NaiveDateTime,
    /// Assigned table, "-1" when unassigned
    pub table_id: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Draft for a new booking, phone already normalized by the entry point
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub main_visitor_name: String,
    pub main_visitor_phone: String,
    pub visitors_count: i32,
    pub date_time: NaiveDateTime,
    pub table_id: String,
    pub notes: Option<String>,
}

/// Full-field booking edit
///
/// `status: None` keeps the stored status; `id` and `created_at` are
/// never touched by an update.
#[derive(Debug, Clone)]
pub struct UpdateBooking {
    pub status: Option<BookingStatus>,
    pub main_visitor_name: String,
    pub main_visitor_phone: String,
    pub visitors_count: i32,
    pub date_time: NaiveDateTime,
    pub table_id: String,
    pub notes: Option<String>,
}

/// Optional visitor filters for date-scoped booking queries
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Case-insensitive substring match on the visitor name
    pub visitor_name: Option<String>,
    /// Substring match on the phone number
    pub visitor_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_labels_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Declined,
            BookingStatus::WaitList,
            BookingStatus::CallAgain,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: BookingStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn wait_list_uses_underscore_label() {
        assert_eq!(BookingStatus::WaitList.as_str(), "WAIT_LIST");
        assert_eq!(BookingStatus::CallAgain.as_str(), "CALL_AGAIN");
    }

    #[test]
    fn labels_parse_back_to_statuses() {
        assert_eq!("WAIT_LIST".parse::<BookingStatus>(), Ok(BookingStatus::WaitList));
        assert!("wait_list".parse::<BookingStatus>().is_err());
        assert!("UNKNOWN".parse::<BookingStatus>().is_err());
    }
}
