//! Repository for chronicle place database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::CreateChroniclePlaceRequest;

use crate::entities::ChroniclePlaceEntity;

/// Repository for chronicle place operations.
#[derive(Clone)]
pub struct ChroniclePlaceRepository {
    pool: PgPool,
}

impl ChroniclePlaceRepository {
    /// Creates a new chronicle place repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a place for the given user.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateChroniclePlaceRequest,
    ) -> Result<ChroniclePlaceEntity, sqlx::Error> {
        sqlx::query_as::<_, ChroniclePlaceEntity>(
            r#"
            INSERT INTO chronicle_places (user_id, name, locality, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, locality, note, created_at
            "#,
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.locality)
        .bind(&request.note)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a place by ID, scoped to its user.
    pub async fn find_by_id_and_user(
        &self,
        place_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ChroniclePlaceEntity>, sqlx::Error> {
        sqlx::query_as::<_, ChroniclePlaceEntity>(
            r#"
            SELECT id, user_id, name, locality, note, created_at
            FROM chronicle_places
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(place_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists a user's places alphabetically.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChroniclePlaceEntity>, sqlx::Error> {
        sqlx::query_as::<_, ChroniclePlaceEntity>(
            r#"
            SELECT id, user_id, name, locality, note, created_at
            FROM chronicle_places
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Deletes a place scoped to its user.
    ///
    /// Entries referencing the place keep existing; their `place_id` is
    /// nulled by the foreign key's ON DELETE SET NULL.
    ///
    /// Returns true if a place was deleted.
    pub async fn delete(&self, place_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM chronicle_places
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(place_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
