//! Staff member model (notification recipients)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A staff member registered for booking notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub id: Uuid,
    pub username: String,
    /// Telegram chat id the notifier delivers to
    pub chat_id: String,
}
