//! Bookings repository for database operations

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BookingStore;
use crate::{
    error::AppResult,
    models::{Booking, BookingFilter, BookingStatus},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY date_time")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status = $1 ORDER BY date_time",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_statuses_ordered(
        &self,
        statuses: &[BookingStatus],
    ) -> AppResult<Vec<Booking>> {
        let labels: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status = ANY($1) ORDER BY created_at",
        )
        .bind(labels)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_date(
        &self,
        date: NaiveDate,
        filter: &BookingFilter,
    ) -> AppResult<Vec<Booking>> {
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let day_end = day_start + Duration::days(1);

        let mut conditions = vec!["date_time >= $1".to_string(), "date_time < $2".to_string()];
        let mut idx = 3;

        if filter.visitor_name.is_some() {
            conditions.push(format!("main_visitor_name ILIKE ${}", idx));
            idx += 1;
        }
        if filter.visitor_phone.is_some() {
            conditions.push(format!("main_visitor_phone LIKE ${}", idx));
        }

        let query = format!(
            "SELECT * FROM bookings WHERE {} ORDER BY date_time",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Booking>(&query)
            .bind(day_start)
            .bind(day_end);
        if let Some(ref name) = filter.visitor_name {
            builder = builder.bind(format!("%{}%", name));
        }
        if let Some(ref phone) = filter.visitor_phone {
            builder = builder.bind(format!("%{}%", phone));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &BookingFilter,
    ) -> AppResult<Vec<Booking>> {
        let range_start = start.and_hms_opt(0, 0, 0).unwrap();
        let range_end = end.and_hms_opt(0, 0, 0).unwrap() + Duration::days(1);

        let mut conditions = vec!["date_time >= $1".to_string(), "date_time < $2".to_string()];
        let mut idx = 3;

        if filter.visitor_name.is_some() {
            conditions.push(format!("main_visitor_name ILIKE ${}", idx));
            idx += 1;
        }
        if filter.visitor_phone.is_some() {
            conditions.push(format!("main_visitor_phone LIKE ${}", idx));
        }

        let query = format!(
            "SELECT * FROM bookings WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Booking>(&query)
            .bind(range_start)
            .bind(range_end);
        if let Some(ref name) = filter.visitor_name {
            builder = builder.bind(format!("%{}%", name));
        }
        if let Some(ref phone) = filter.visitor_phone {
            builder = builder.bind(format!("%{}%", phone));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn save(&self, booking: &Booking) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, status, main_visitor_name, main_visitor_phone,
                                  visitors_count, date_time, table_id, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                main_visitor_name = EXCLUDED.main_visitor_name,
                main_visitor_phone = EXCLUDED.main_visitor_phone,
                visitors_count = EXCLUDED.visitors_count,
                date_time = EXCLUDED.date_time,
                table_id = EXCLUDED.table_id,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(booking.id)
        .bind(booking.status)
        .bind(&booking.main_visitor_name)
        .bind(&booking.main_visitor_phone)
        .bind(booking.visitors_count)
        .bind(booking.date_time)
        .bind(&booking.table_id)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
