//! Repository for chronicle entry database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{
    ChronicleKind, CreateChronicleEntryRequest, UpdateChronicleEntryRequest,
};

use crate::entities::ChronicleEntryEntity;

/// Repository for chronicle entry operations.
#[derive(Clone)]
pub struct ChronicleEntryRepository {
    pool: PgPool,
}

impl ChronicleEntryRepository {
    /// Creates a new chronicle entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a chronicle entry for the given user.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateChronicleEntryRequest,
    ) -> Result<ChronicleEntryEntity, sqlx::Error> {
        sqlx::query_as::<_, ChronicleEntryEntity>(
            r#"
            INSERT INTO chronicle_entries (user_id, kind, title, description, happened_on, place_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, kind, title, description, happened_on, place_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(request.kind.as_str())
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.happened_on)
        .bind(request.place_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists a user's entries, most recent happenings first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: Option<ChronicleKind>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChronicleEntryEntity>, sqlx::Error> {
        match kind {
            Some(kind) => {
                sqlx::query_as::<_, ChronicleEntryEntity>(
                    r#"
                    SELECT id, user_id, kind, title, description, happened_on, place_id, created_at, updated_at
                    FROM chronicle_entries
                    WHERE user_id = $1 AND kind = $2
                    ORDER BY happened_on DESC, created_at DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(user_id)
                .bind(kind.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ChronicleEntryEntity>(
                    r#"
                    SELECT id, user_id, kind, title, description, happened_on, place_id, created_at, updated_at
                    FROM chronicle_entries
                    WHERE user_id = $1
                    ORDER BY happened_on DESC, created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(user_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    /// Counts a user's entries.
    pub async fn count_by_user(
        &self,
        user_id: Uuid,
        kind: Option<ChronicleKind>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = match kind {
            Some(kind) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM chronicle_entries WHERE user_id = $1 AND kind = $2",
                )
                .bind(user_id)
                .bind(kind.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM chronicle_entries WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(result.0)
    }

    /// Updates an entry; absent fields are left unchanged.
    ///
    /// Returns the updated entry, or `None` if the user owns no such
    /// entry.
    pub async fn update(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        request: &UpdateChronicleEntryRequest,
    ) -> Result<Option<ChronicleEntryEntity>, sqlx::Error> {
        sqlx::query_as::<_, ChronicleEntryEntity>(
            r#"
            UPDATE chronicle_entries
            SET kind = COALESCE($3, kind),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                happened_on = COALESCE($6, happened_on),
                place_id = COALESCE($7, place_id),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, kind, title, description, happened_on, place_id, created_at, updated_at
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .bind(request.kind.map(|k| k.as_str()))
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.happened_on)
        .bind(request.place_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes an entry scoped to its user.
    ///
    /// Returns true if an entry was deleted.
    pub async fn delete(&self, entry_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM chronicle_entries
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
