//! Repository for work entry database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{CreateWorkEntryRequest, UpdateWorkEntryRequest};

use crate::entities::WorkEntryEntity;

/// Repository for work entry operations.
#[derive(Clone)]
pub struct WorkEntryRepository {
    pool: PgPool,
}

impl WorkEntryRepository {
    /// Creates a new work entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a work entry for the given user.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateWorkEntryRequest,
    ) -> Result<WorkEntryEntity, sqlx::Error> {
        sqlx::query_as::<_, WorkEntryEntity>(
            r#"
            INSERT INTO work_entries (user_id, company, title, started_on, ended_on, summary, chronicle_note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, company, title, started_on, ended_on, summary, chronicle_note,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&request.company)
        .bind(&request.title)
        .bind(request.started_on)
        .bind(request.ended_on)
        .bind(&request.summary)
        .bind(&request.chronicle_note)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists a user's work entries, most recent first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkEntryEntity>, sqlx::Error> {
        sqlx::query_as::<_, WorkEntryEntity>(
            r#"
            SELECT id, user_id, company, title, started_on, ended_on, summary, chronicle_note,
                   created_at, updated_at
            FROM work_entries
            WHERE user_id = $1
            ORDER BY started_on DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a user's work entries.
    pub async fn count_by_user(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM work_entries WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Updates a work entry; absent fields are left unchanged.
    ///
    /// Returns the updated entry, or `None` if the user owns no such
    /// entry.
    pub async fn update(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        request: &UpdateWorkEntryRequest,
    ) -> Result<Option<WorkEntryEntity>, sqlx::Error> {
        sqlx::query_as::<_, WorkEntryEntity>(
            r#"
            UPDATE work_entries
            SET company = COALESCE($3, company),
                title = COALESCE($4, title),
                started_on = COALESCE($5, started_on),
                ended_on = COALESCE($6, ended_on),
                summary = COALESCE($7, summary),
                chronicle_note = COALESCE($8, chronicle_note),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, company, title, started_on, ended_on, summary, chronicle_note,
                      created_at, updated_at
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .bind(&request.company)
        .bind(&request.title)
        .bind(request.started_on)
        .bind(request.ended_on)
        .bind(&request.summary)
        .bind(&request.chronicle_note)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a work entry scoped to its user.
    ///
    /// Returns true if an entry was deleted.
    pub async fn delete(&self, entry_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM work_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
