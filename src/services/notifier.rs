//! Staff notifications for new bookings

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::staff::StaffService;
use crate::{
    error::{AppError, AppResult},
    models::Booking,
};

/// Outbound message delivery to a single staff chat
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, chat_id: &str, text: &str) -> AppResult<()>;
}

/// Telegram message delivery
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn notify(&self, chat_id: &str, text: &str) -> AppResult<()> {
        let id: i64 = chat_id
            .parse()
            .map_err(|_| AppError::Internal(format!("Invalid chat id: {}", chat_id)))?;

        self.bot
            .send_message(ChatId(id), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| AppError::Internal(format!("Telegram send failed: {}", e)))?;
        Ok(())
    }
}

/// Sink used when Telegram is disabled; logs and drops messages
pub struct DisabledSink;

#[async_trait]
impl NotificationSink for DisabledSink {
    async fn notify(&self, chat_id: &str, _text: &str) -> AppResult<()> {
        tracing::debug!("Telegram disabled, dropping notification for chat {}", chat_id);
        Ok(())
    }
}

/// Broadcasts booking alerts to all registered staff members
#[derive(Clone)]
pub struct NotifierService {
    staff: StaffService,
    sink: Arc<dyn NotificationSink>,
}

impl NotifierService {
    pub fn new(staff: StaffService, sink: Arc<dyn NotificationSink>) -> Self {
        Self { staff, sink }
    }

    /// Send a new-booking alert to every staff member.
    ///
    /// Delivery is sequential and best-effort: a failing recipient is
    /// logged and the loop continues with the rest.
    pub async fn notify_new_booking(&self, booking: &Booking) -> AppResult<()> {
        let staff_members = self.staff.list().await?;

        if staff_members.is_empty() {
            return Ok(());
        }

        let text = format_booking_alert(booking);

        for member in staff_members {
            tracing::info!("Sending booking notification to chat {}", member.chat_id);
            if let Err(err) = self.sink.notify(&member.chat_id, &text).await {
                tracing::warn!(
                    "Failed to notify staff member {}: {}",
                    member.username,
                    err
                );
            }
        }

        Ok(())
    }
}

/// Markdown alert text for a new booking
fn format_booking_alert(booking: &Booking) -> String {
    let phone = display_phone(&booking.main_visitor_phone);
    let whatsapp: String = phone.chars().filter(char::is_ascii_digit).collect();

    let mut text = format!(
        "🔔 *New Booking Alert!* 🔔\n\n\
         👤 *Visitor:* {}\n\
         📱 *Phone:* {}\n\
         📅 *Date:* {}\n\
         🕒 *Time:* {}\n\
         👥 *Guests:* {}\n",
        booking.main_visitor_name,
        phone,
        booking.date_time.format("%d.%m.%Y"),
        booking.date_time.format("%H:%M"),
        booking.visitors_count,
    );

    if let Some(notes) = booking.notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!("📝 *Notes:* {}\n", notes));
    }

    text.push_str(&format!(
        "\n[💬 Chat on WhatsApp](https://wa.me/{})",
        whatsapp
    ));

    text
}

/// Display form of a stored phone: a leading `8` is shown as `+7`
fn display_phone(phone: &str) -> String {
    if phone.starts_with('+') {
        phone.to_string()
    } else if let Some(rest) = phone.strip_prefix('8') {
        format!("+7{}", rest)
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, StaffMember};
    use crate::repository::MockStaffStore;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn booking(notes: Option<&str>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            status: BookingStatus::Pending,
            main_visitor_name: "Aigerim".to_string(),
            main_visitor_phone: "87771112233".to_string(),
            visitors_count: 4,
            date_time: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap(),
            table_id: "-1".to_string(),
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn member(username: &str, chat_id: &str) -> StaffMember {
        StaffMember {
            id: Uuid::new_v4(),
            username: username.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    #[test]
    fn alert_shows_plus_seven_phone_and_whatsapp_link() {
        let text = format_booking_alert(&booking(None));
        assert!(text.contains("📱 *Phone:* +77771112233"));
        assert!(text.contains("[💬 Chat on WhatsApp](https://wa.me/77771112233)"));
        assert!(text.contains("📅 *Date:* 14.03.2026"));
        assert!(text.contains("🕒 *Time:* 19:30"));
        assert!(text.contains("👥 *Guests:* 4"));
        assert!(!text.contains("*Notes:*"));
    }

    #[test]
    fn alert_includes_notes_when_present() {
        let text = format_booking_alert(&booking(Some("window table please")));
        assert!(text.contains("📝 *Notes:* window table please"));
    }

    #[test]
    fn display_phone_keeps_foreign_numbers() {
        assert_eq!(display_phone("+496912345678"), "+496912345678");
        assert_eq!(display_phone("12025550123"), "12025550123");
    }

    #[tokio::test]
    async fn one_failing_recipient_does_not_block_the_rest() {
        let mut staff_store = MockStaffStore::new();
        staff_store
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![member("ayan", "100"), member("dana", "200")]));

        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .withf(|chat_id, _| chat_id == "100")
            .times(1)
            .returning(|_, _| Err(AppError::Internal("chat not reachable".to_string())));
        sink.expect_notify()
            .withf(|chat_id, _| chat_id == "200")
            .times(1)
            .returning(|_, _| Ok(()));

        let notifier = NotifierService::new(
            StaffService::new(Arc::new(staff_store)),
            Arc::new(sink),
        );

        notifier.notify_new_booking(&booking(None)).await.unwrap();
    }

    #[tokio::test]
    async fn no_staff_means_no_delivery() {
        let mut staff_store = MockStaffStore::new();
        staff_store.expect_find_all().times(1).returning(|| Ok(vec![]));

        let sink = MockNotificationSink::new();

        let notifier = NotifierService::new(
            StaffService::new(Arc::new(staff_store)),
            Arc::new(sink),
        );

        notifier.notify_new_booking(&booking(None)).await.unwrap();
    }
}
