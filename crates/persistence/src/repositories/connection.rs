//! Repository for connection database operations.

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{ConnectionStatus, INVITE_CODE_PREFIX, INVITE_CODE_SUFFIX_LEN};

use crate::entities::ConnectionEntity;

/// Repository for connection operations.
#[derive(Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Creates a new connection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a pending connection for the given inviter.
    ///
    /// `contact_id` optionally links a pre-created contact placeholder
    /// whose `linked_profile_id` is filled in at redemption.
    pub async fn create(
        &self,
        inviter_id: Uuid,
        invite_code: &str,
        contact_id: Option<Uuid>,
    ) -> Result<ConnectionEntity, sqlx::Error> {
        sqlx::query_as::<_, ConnectionEntity>(
            r#"
            INSERT INTO connections (inviter_id, invite_code, contact_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, invite_code, inviter_id, invitee_id, contact_id, status, accepted_at, created_at
            "#,
        )
        .bind(inviter_id)
        .bind(invite_code)
        .bind(contact_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds the pending connection with the given (normalized) code.
    ///
    /// Returns `None` when no pending connection matches; accepted
    /// connections never match, which is what makes a second redemption
    /// of the same code a no-op.
    pub async fn find_pending_by_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<ConnectionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ConnectionEntity>(
            r#"
            SELECT id, invite_code, inviter_id, invitee_id, contact_id, status, accepted_at, created_at
            FROM connections
            WHERE invite_code = $1 AND status = 'pending'
            LIMIT 1
            "#,
        )
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await
    }

    /// Checks for an accepted connection between two users in either
    /// direction.
    pub async fn exists_accepted_between(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM connections
            WHERE status = 'accepted'
              AND ((inviter_id = $1 AND invitee_id = $2)
                OR (inviter_id = $2 AND invitee_id = $1))
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0 > 0)
    }

    /// Accepts a pending connection atomically.
    ///
    /// The `status = 'pending'` predicate serializes concurrent
    /// redemptions of the same code: exactly one update can flip the row.
    ///
    /// Returns `true` if this call performed the flip, `false` if another
    /// redemption already accepted the connection.
    pub async fn accept(
        &self,
        connection_id: Uuid,
        invitee_id: Uuid,
        contact_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE connections
            SET invitee_id = $2, contact_id = $3, status = 'accepted', accepted_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(connection_id)
        .bind(invitee_id)
        .bind(contact_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists connections where the user is inviter or invitee, newest
    /// first, optionally filtered by status.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<ConnectionEntity>, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_as::<_, ConnectionEntity>(
                    r#"
                    SELECT id, invite_code, inviter_id, invitee_id, contact_id, status, accepted_at, created_at
                    FROM connections
                    WHERE (inviter_id = $1 OR invitee_id = $1) AND status = $2
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ConnectionEntity>(
                    r#"
                    SELECT id, invite_code, inviter_id, invitee_id, contact_id, status, accepted_at, created_at
                    FROM connections
                    WHERE inviter_id = $1 OR invitee_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    /// Checks whether an invite code is already taken.
    pub async fn code_exists(&self, invite_code: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM connections WHERE invite_code = $1")
                .bind(invite_code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0 > 0)
    }
}

/// Generate an invite code: the fixed prefix plus six characters from an
/// unambiguous uppercase charset (no 0, O, 1, I or L).
pub fn generate_invite_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();

    let suffix: String = (0..INVITE_CODE_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("{}{}", INVITE_CODE_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::normalize_invite_code;

    #[test]
    fn test_generate_invite_code_format() {
        let code = generate_invite_code();
        assert!(code.starts_with(INVITE_CODE_PREFIX));
        assert_eq!(
            code.len(),
            INVITE_CODE_PREFIX.len() + INVITE_CODE_SUFFIX_LEN
        );
    }

    #[test]
    fn test_generate_invite_code_charset() {
        let code = generate_invite_code();
        let suffix = &code[INVITE_CODE_PREFIX.len()..];
        // No confusing characters
        for confusing in ['0', 'O', '1', 'I', 'L'] {
            assert!(!suffix.contains(confusing), "code contained {}", confusing);
        }
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_invite_code_unique() {
        let code1 = generate_invite_code();
        let code2 = generate_invite_code();
        assert_ne!(code1, code2);
    }

    #[test]
    fn test_generated_code_is_already_normalized() {
        let code = generate_invite_code();
        assert_eq!(normalize_invite_code(&code), code);
    }
}
