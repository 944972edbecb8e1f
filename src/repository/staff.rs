//! Staff members repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::StaffStore;
use crate::{error::AppResult, models::StaffMember};

#[derive(Clone)]
pub struct StaffRepository {
    pool: Pool<Postgres>,
}

impl StaffRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffStore for StaffRepository {
    async fn find_all(&self) -> AppResult<Vec<StaffMember>> {
        let rows = sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn save(&self, member: &StaffMember) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO staff_members (id, username, chat_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (chat_id) DO UPDATE SET
                username = EXCLUDED.username
            "#,
        )
        .bind(member.id)
        .bind(&member.username)
        .bind(&member.chat_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
