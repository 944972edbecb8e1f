//! Disabled date model (whole-day and time-range blocks)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A date on which booking is blocked, wholly or for a time range
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DisabledDate {
    pub id: Uuid,
    /// Blocked date; for recurring rules the year is ignored when matching
    pub date: NaiveDate,
    /// Start of the blocked range; absent together with `end_time` for a
    /// whole-day block
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    /// Recur every year on this day-of-month and month
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

impl DisabledDate {
    /// The blocked time range, when both endpoints are set
    pub fn time_range(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Whole-day blocks carry no time range at all
    pub fn is_whole_day(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }
}

/// Create disabled date request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDisabledDate {
    /// Blocked date (YYYY-MM-DD)
    pub date: String,
    /// Range start (HH:MM), requires `end_time`
    pub start_time: Option<String>,
    /// Range end (HH:MM), requires `start_time`
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
}

/// Update disabled date request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDisabledDate {
    /// Blocked date (YYYY-MM-DD)
    pub date: String,
    /// Range start (HH:MM), requires `end_time`
    pub start_time: Option<String>,
    /// Range end (HH:MM), requires `start_time`
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
}

/// Query parameters for listing disabled dates
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DisabledDateQuery {
    /// Filter from this date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Filter until this date (YYYY-MM-DD)
    pub end_date: Option<String>,
}
