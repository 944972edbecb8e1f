//! Visitors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::VisitorStore;
use crate::{
    error::AppResult,
    models::{GuestRecord, GuestVisit, Visitor},
};

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorStore for VisitorsRepository {
    async fn find_all(&self) -> AppResult<Vec<Visitor>> {
        let rows = sqlx::query_as::<_, Visitor>("SELECT * FROM visitors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Visitor>> {
        let row = sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_phone_number(&self, phone: &str) -> AppResult<Option<Visitor>> {
        let row = sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE phone_number = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, visitor: &Visitor) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO visitors (id, phone_number, name, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                phone_number = EXCLUDED.phone_number,
                name = EXCLUDED.name,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(visitor.id)
        .bind(&visitor.phone_number)
        .bind(&visitor.name)
        .bind(&visitor.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_guests(&self, limit: i64, offset: i64) -> AppResult<Vec<GuestRecord>> {
        let rows = sqlx::query_as::<_, GuestRecord>(
            r#"
            SELECT v.id, v.phone_number, v.name, v.notes, COUNT(b.id) AS confirmed_count
            FROM visitors v
            JOIN bookings b ON b.main_visitor_phone = v.phone_number
                           AND b.status = 'CONFIRMED'
            GROUP BY v.id, v.phone_number, v.name, v.notes
            ORDER BY confirmed_count DESC, v.name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_guests(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT v.id)
            FROM visitors v
            JOIN bookings b ON b.main_visitor_phone = v.phone_number
                           AND b.status = 'CONFIRMED'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn find_confirmed_visits(&self, phone: &str) -> AppResult<Vec<GuestVisit>> {
        let rows = sqlx::query_as::<_, GuestVisit>(
            r#"
            SELECT date_time, visitors_count
            FROM bookings
            WHERE main_visitor_phone = $1 AND status = 'CONFIRMED'
            ORDER BY date_time DESC
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
