//! Booking lifecycle and queries

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::notifier::NotifierService;
use super::visitors::VisitorsService;
use crate::{
    error::{AppError, AppResult},
    models::{Booking, BookingFilter, BookingStatus, NewBooking, NewVisitor, UpdateBooking},
    repository::BookingStore,
};

/// Statuses shown in the staff triage queue, oldest first
pub const TRIAGE_STATUSES: [BookingStatus; 3] = [
    BookingStatus::Pending,
    BookingStatus::WaitList,
    BookingStatus::CallAgain,
];

#[derive(Clone)]
pub struct BookingsService {
    bookings: Arc<dyn BookingStore>,
    visitors: VisitorsService,
    notifier: NotifierService,
}

impl BookingsService {
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        visitors: VisitorsService,
        notifier: NotifierService,
    ) -> Self {
        Self {
            bookings,
            visitors,
            notifier,
        }
    }

    /// Create a booking in `PENDING` status.
    ///
    /// The main visitor is added to the visitor directory if their phone
    /// number is not known yet, and all registered staff are notified.
    pub async fn create(&self, draft: NewBooking) -> AppResult<Booking> {
        validate_booking_time(draft.date_time)?;

        let booking = Booking {
            id: Uuid::new_v4(),
            status: BookingStatus::Pending,
            main_visitor_name: draft.main_visitor_name,
            main_visitor_phone: draft.main_visitor_phone,
            visitors_count: draft.visitors_count,
            date_time: draft.date_time,
            table_id: draft.table_id,
            notes: draft.notes,
            created_at: Utc::now(),
        };
        self.bookings.save(&booking).await?;

        self.visitors
            .create(NewVisitor {
                phone_number: booking.main_visitor_phone.clone(),
                name: booking.main_visitor_name.clone(),
                notes: Some(format!(
                    "Created at {} from booking {}",
                    booking.date_time.format("%Y-%m-%dT%H:%M:%S"),
                    booking.id
                )),
            })
            .await?;

        if booking.status == BookingStatus::Pending {
            self.notifier.notify_new_booking(&booking).await?;
        }

        Ok(booking)
    }

    /// Replace the stored fields of an existing booking.
    ///
    /// `created_at` is preserved, and the status only changes when the
    /// update carries one.
    pub async fn update(&self, id: Uuid, fields: UpdateBooking) -> AppResult<Booking> {
        let existing = self.get(id).await?;
        validate_booking_time(fields.date_time)?;

        let booking = Booking {
            id,
            status: fields.status.unwrap_or(existing.status),
            main_visitor_name: fields.main_visitor_name,
            main_visitor_phone: fields.main_visitor_phone,
            visitors_count: fields.visitors_count,
            date_time: fields.date_time,
            table_id: fields.table_id,
            notes: fields.notes,
            created_at: existing.created_at,
        };
        self.bookings.save(&booking).await?;
        Ok(booking)
    }

    pub async fn confirm(&self, id: Uuid) -> AppResult<Booking> {
        self.set_status(id, BookingStatus::Confirmed).await
    }

    pub async fn decline(&self, id: Uuid) -> AppResult<Booking> {
        self.set_status(id, BookingStatus::Declined).await
    }

    pub async fn wait_list(&self, id: Uuid) -> AppResult<Booking> {
        self.set_status(id, BookingStatus::WaitList).await
    }

    pub async fn call_again(&self, id: Uuid) -> AppResult<Booking> {
        self.set_status(id, BookingStatus::CallAgain).await
    }

    async fn set_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let booking = self.get(id).await?;
        let updated = Booking { status, ..booking };
        self.bookings.save(&updated).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.bookings.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                id
            )));
        }
        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        self.bookings.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    pub async fn by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_status(status).await
    }

    /// Bookings awaiting a staff decision, oldest first
    pub async fn pending_queue(&self) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_statuses_ordered(&TRIAGE_STATUSES).await
    }

    /// Confirmed bookings for the current local date
    pub async fn today_confirmed(&self) -> AppResult<Vec<Booking>> {
        let today = Local::now().date_naive();
        let mut bookings = self
            .bookings
            .find_by_date(today, &BookingFilter::default())
            .await?;
        bookings.retain(|b| b.status == BookingStatus::Confirmed);
        Ok(bookings)
    }

    pub async fn by_date(&self, date: NaiveDate, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_date(date, filter).await
    }

    pub async fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &BookingFilter,
    ) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_date_range(start, end, filter).await
    }
}

/// Bookings start on the hour or half past, with no second component.
fn validate_booking_time(date_time: NaiveDateTime) -> AppResult<()> {
    if date_time.minute() != 0 && date_time.minute() != 30 {
        return Err(AppError::InvalidBookingTime(
            "Booking time must be at the beginning of the hour or half past (e.g., 9:00 or 9:30)"
                .to_string(),
        ));
    }
    if date_time.second() != 0 || date_time.nanosecond() != 0 {
        return Err(AppError::InvalidBookingTime(
            "Booking time must not include seconds or milliseconds".to_string(),
        ));
    }
    Ok(())
}
