//! Repository for profile database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::UpdateProfileRequest;

use crate::entities::ProfileEntity;

/// Repository for profile operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the profile row for a freshly registered user.
    pub async fn create(
        &self,
        user_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<ProfileEntity, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profiles (user_id, full_name, email)
            VALUES ($1, $2, $3)
            RETURNING user_id, full_name, email, avatar_url, location, bio, website, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a profile snapshot by user ID.
    ///
    /// Returns `None` if the user has no profile row; redemption treats
    /// that as a missing dependency and aborts.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT user_id, full_name, email, avatar_url, location, bio, website, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Updates a profile's display fields.
    ///
    /// Returns the updated profile, or `None` if no row exists.
    pub async fn update(
        &self,
        user_id: Uuid,
        request: &UpdateProfileRequest,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE profiles
            SET full_name = $2,
                avatar_url = $3,
                location = $4,
                bio = $5,
                website = $6,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, full_name, email, avatar_url, location, bio, website, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&request.full_name)
        .bind(&request.avatar_url)
        .bind(&request.location)
        .bind(&request.bio)
        .bind(&request.website)
        .fetch_optional(&self.pool)
        .await
    }
}
