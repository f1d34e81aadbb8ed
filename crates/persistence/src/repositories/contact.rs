//! Repository for contact database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{CreateContactRequest, RelationshipType, UpdateContactRequest};

use crate::entities::{ContactEntity, ProfileEntity};

/// Repository for contact card operations.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Creates a new contact repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates an unlinked contact card from a client request.
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreateContactRequest,
    ) -> Result<ContactEntity, sqlx::Error> {
        sqlx::query_as::<_, ContactEntity>(
            r#"
            INSERT INTO contacts (owner_id, full_name, email, avatar_url, location, bio, website, relationship_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                      website, relationship_type, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.avatar_url)
        .bind(&request.location)
        .bind(&request.bio)
        .bind(&request.website)
        .bind(request.relationship_type.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Idempotent upsert of a linked contact card, keyed on the
    /// (owner_id, linked_profile_id) natural key.
    ///
    /// A fresh card is populated from the counterpart's profile snapshot
    /// with relationship type `connection`. If the card already exists
    /// (a half-finished earlier redemption, or a concurrent one) the
    /// existing row is returned untouched apart from `updated_at`, so the
    /// caller always gets exactly one card per direction.
    pub async fn upsert_linked(
        &self,
        owner_id: Uuid,
        linked_profile_id: Uuid,
        snapshot: &ProfileEntity,
    ) -> Result<ContactEntity, sqlx::Error> {
        sqlx::query_as::<_, ContactEntity>(
            r#"
            INSERT INTO contacts (owner_id, linked_profile_id, full_name, email, avatar_url,
                                  location, bio, website, relationship_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (owner_id, linked_profile_id) WHERE linked_profile_id IS NOT NULL
            DO UPDATE SET updated_at = NOW()
            RETURNING id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                      website, relationship_type, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(linked_profile_id)
        .bind(&snapshot.full_name)
        .bind(&snapshot.email)
        .bind(&snapshot.avatar_url)
        .bind(&snapshot.location)
        .bind(&snapshot.bio)
        .bind(&snapshot.website)
        .bind(RelationshipType::Connection.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Finds the card an owner holds for a linked profile.
    pub async fn find_by_owner_and_linked(
        &self,
        owner_id: Uuid,
        linked_profile_id: Uuid,
    ) -> Result<Option<ContactEntity>, sqlx::Error> {
        sqlx::query_as::<_, ContactEntity>(
            r#"
            SELECT id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                   website, relationship_type, created_at, updated_at
            FROM contacts
            WHERE owner_id = $1 AND linked_profile_id = $2
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(linked_profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Links a placeholder card to a profile.
    ///
    /// The `linked_profile_id IS NULL` predicate keeps the operation
    /// re-entrant: a card that was already linked is left alone.
    ///
    /// Returns `true` if the card was linked by this call.
    pub async fn link_placeholder(
        &self,
        contact_id: Uuid,
        owner_id: Uuid,
        linked_profile_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET linked_profile_id = $3, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2 AND linked_profile_id IS NULL
            "#,
        )
        .bind(contact_id)
        .bind(owner_id)
        .bind(linked_profile_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a card by ID, scoped to its owner.
    pub async fn find_by_id_and_owner(
        &self,
        contact_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ContactEntity>, sqlx::Error> {
        sqlx::query_as::<_, ContactEntity>(
            r#"
            SELECT id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                   website, relationship_type, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(contact_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists an owner's cards, newest first.
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        linked_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactEntity>, sqlx::Error> {
        let query = if linked_only {
            r#"
            SELECT id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                   website, relationship_type, created_at, updated_at
            FROM contacts
            WHERE owner_id = $1 AND linked_profile_id IS NOT NULL
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        } else {
            r#"
            SELECT id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                   website, relationship_type, created_at, updated_at
            FROM contacts
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        };

        sqlx::query_as::<_, ContactEntity>(query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Counts an owner's cards.
    pub async fn count_by_owner(
        &self,
        owner_id: Uuid,
        linked_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let query = if linked_only {
            "SELECT COUNT(*) FROM contacts WHERE owner_id = $1 AND linked_profile_id IS NOT NULL"
        } else {
            "SELECT COUNT(*) FROM contacts WHERE owner_id = $1"
        };

        let result: (i64,) = sqlx::query_as(query)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Updates a card; absent fields are left unchanged.
    ///
    /// Returns the updated card, or `None` if the owner holds no such
    /// card.
    pub async fn update(
        &self,
        contact_id: Uuid,
        owner_id: Uuid,
        request: &UpdateContactRequest,
    ) -> Result<Option<ContactEntity>, sqlx::Error> {
        sqlx::query_as::<_, ContactEntity>(
            r#"
            UPDATE contacts
            SET full_name = COALESCE($3, full_name),
                email = COALESCE($4, email),
                avatar_url = COALESCE($5, avatar_url),
                location = COALESCE($6, location),
                bio = COALESCE($7, bio),
                website = COALESCE($8, website),
                relationship_type = COALESCE($9, relationship_type),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, linked_profile_id, full_name, email, avatar_url, location, bio,
                      website, relationship_type, created_at, updated_at
            "#,
        )
        .bind(contact_id)
        .bind(owner_id)
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.avatar_url)
        .bind(&request.location)
        .bind(&request.bio)
        .bind(&request.website)
        .bind(request.relationship_type.map(|rt| rt.as_str()))
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a card scoped to its owner.
    ///
    /// Returns true if a card was deleted.
    pub async fn delete(&self, contact_id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(contact_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
