//! Disabled dates repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::DisabledDateStore;
use crate::{error::AppResult, models::DisabledDate};

#[derive(Clone)]
pub struct DisabledDatesRepository {
    pool: Pool<Postgres>,
}

impl DisabledDatesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisabledDateStore for DisabledDatesRepository {
    async fn find_all(&self) -> AppResult<Vec<DisabledDate>> {
        let rows = sqlx::query_as::<_, DisabledDate>(
            "SELECT * FROM disabled_dates ORDER BY date, start_time",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DisabledDate>> {
        let row = sqlx::query_as::<_, DisabledDate>("SELECT * FROM disabled_dates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<DisabledDate>> {
        let rows = sqlx::query_as::<_, DisabledDate>(
            "SELECT * FROM disabled_dates WHERE date = $1 ORDER BY start_time",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DisabledDate>> {
        let rows = sqlx::query_as::<_, DisabledDate>(
            "SELECT * FROM disabled_dates WHERE date >= $1 AND date <= $2 ORDER BY date, start_time",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_recurring(&self) -> AppResult<Vec<DisabledDate>> {
        let rows = sqlx::query_as::<_, DisabledDate>(
            "SELECT * FROM disabled_dates WHERE is_recurring = TRUE ORDER BY date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn save(&self, disabled_date: &DisabledDate) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO disabled_dates (id, date, start_time, end_time, description,
                                        is_recurring, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                date = EXCLUDED.date,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                description = EXCLUDED.description,
                is_recurring = EXCLUDED.is_recurring
            "#,
        )
        .bind(disabled_date.id)
        .bind(disabled_date.date)
        .bind(disabled_date.start_time)
        .bind(disabled_date.end_time)
        .bind(&disabled_date.description)
        .bind(disabled_date.is_recurring)
        .bind(disabled_date.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM disabled_dates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
