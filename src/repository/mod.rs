//! Repository layer for database operations

pub mod bookings;
pub mod disabled_dates;
pub mod staff;
pub mod visitors;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Booking, BookingFilter, BookingStatus, DisabledDate, GuestRecord, GuestVisit,
        StaffMember, Visitor,
    },
};

/// Durable keyed storage of bookings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;
    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>>;
    /// Ordered by `created_at` ascending, oldest first
    async fn find_by_statuses_ordered(
        &self,
        statuses: &[BookingStatus],
    ) -> AppResult<Vec<Booking>>;
    /// Bookings on a single date, ordered by `date_time`
    async fn find_by_date(
        &self,
        date: NaiveDate,
        filter: &BookingFilter,
    ) -> AppResult<Vec<Booking>>;
    /// Bookings in an inclusive date range, ordered by `created_at` descending
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &BookingFilter,
    ) -> AppResult<Vec<Booking>>;
    /// Upsert by id; `created_at` is written once and never overwritten
    async fn save(&self, booking: &Booking) -> AppResult<()>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}

/// Durable keyed storage of visitors, unique by phone number
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Visitor>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Visitor>>;
    async fn find_by_phone_number(&self, phone: &str) -> AppResult<Option<Visitor>>;
    /// Upsert by id
    async fn save(&self, visitor: &Visitor) -> AppResult<()>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    /// Visitors with at least one confirmed booking, most bookings first
    async fn find_guests(&self, limit: i64, offset: i64) -> AppResult<Vec<GuestRecord>>;
    async fn count_guests(&self) -> AppResult<i64>;
    /// Confirmed bookings for a phone number, newest first
    async fn find_confirmed_visits(&self, phone: &str) -> AppResult<Vec<GuestVisit>>;
}

/// Durable keyed storage of disabled dates
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisabledDateStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<DisabledDate>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DisabledDate>>;
    /// Records whose stored date matches exactly (recurring or not)
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<DisabledDate>>;
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DisabledDate>>;
    async fn find_recurring(&self) -> AppResult<Vec<DisabledDate>>;
    /// Upsert by id
    async fn save(&self, disabled_date: &DisabledDate) -> AppResult<()>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}

/// Staff members receiving booking notifications
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<StaffMember>>;
    /// Upsert; one registration per chat id, re-registering renames
    async fn save(&self, member: &StaffMember) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub bookings: bookings::BookingsRepository,
    pub visitors: visitors::VisitorsRepository,
    pub disabled_dates: disabled_dates::DisabledDatesRepository,
    pub staff: staff::StaffRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            bookings: bookings::BookingsRepository::new(pool.clone()),
            visitors: visitors::VisitorsRepository::new(pool.clone()),
            disabled_dates: disabled_dates::DisabledDatesRepository::new(pool.clone()),
            staff: staff::StaffRepository::new(pool.clone()),
            pool,
        }
    }
}
