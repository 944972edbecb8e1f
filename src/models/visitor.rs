//! Visitor model and guest analytics rows

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A visitor, unique by phone number
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: Uuid,
    /// Unique phone number, digits only for auto-created visitors
    pub phone_number: String,
    pub name: String,
    pub notes: Option<String>,
}

/// Draft for a new visitor
#[derive(Debug, Clone)]
pub struct NewVisitor {
    pub phone_number: String,
    pub name: String,
    pub notes: Option<String>,
}

/// Full-field visitor edit
#[derive(Debug, Clone)]
pub struct UpdateVisitor {
    pub phone_number: String,
    pub name: String,
    pub notes: Option<String>,
}

/// A visitor ranked by confirmed bookings (guest list row)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GuestRecord {
    pub id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub notes: Option<String>,
    /// Number of confirmed bookings for this phone number
    pub confirmed_count: i64,
}

/// One confirmed booking in a visitor's history
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GuestVisit {
    pub date_time: NaiveDateTime,
    pub visitors_count: i32,
}
