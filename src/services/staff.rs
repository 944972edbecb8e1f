//! Staff roster for notification delivery

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::StaffMember,
    repository::StaffStore,
};

#[derive(Clone)]
pub struct StaffService {
    staff: Arc<dyn StaffStore>,
}

impl StaffService {
    pub fn new(staff: Arc<dyn StaffStore>) -> Self {
        Self { staff }
    }

    /// Register a staff member for booking notifications.
    ///
    /// One registration per chat: registering again from the same chat
    /// replaces the stored username.
    pub async fn register(&self, username: &str, chat_id: &str) -> AppResult<StaffMember> {
        let member = StaffMember {
            id: Uuid::new_v4(),
            username: username.to_string(),
            chat_id: chat_id.to_string(),
        };
        self.staff.save(&member).await?;
        tracing::info!("Registered staff member {} for chat {}", username, chat_id);
        Ok(member)
    }

    pub async fn list(&self) -> AppResult<Vec<StaffMember>> {
        self.staff.find_all().await
    }
}
