//! Authentication service: registration, login, auth-code exchange and
//! session management.

use chrono::{Duration, Utc};
use shared::crypto::{generate_opaque_token, sha256_hex};
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::validation::validate_password_strength;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use domain::models::normalize_invite_code;
use persistence::repositories::ProfileRepository;

use crate::config::JwtAuthConfig;

/// One-time auth codes live this long.
const AUTH_CODE_EXPIRY_MINUTES: i64 = 15;

/// Length of the opaque auth code returned at registration.
const AUTH_CODE_LEN: usize = 32;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Invalid or expired authorization code")]
    InvalidAuthCode,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_in: i64,
}

/// Result of a successful registration.
///
/// The auth code is returned exactly once; the caller exchanges it at
/// the callback endpoint for a session.
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub auth_code: String,
}

/// Token pair generated for a session.
#[derive(Debug, Clone)]
struct TokenPair {
    access_token: String,
    refresh_token: String,
}

/// Database row for user query.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: Option<String>,
    display_name: String,
    is_active: bool,
    email_verified: bool,
}

/// Builds a JWT config from the raw PEM material in configuration.
///
/// Shared with the auth extractor so token validation and token issuing
/// agree on keys and leeway.
pub fn build_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, AuthError> {
    JwtConfig::with_leeway(
        &normalize_pem_key(&config.private_key),
        &normalize_pem_key(&config.public_key),
        config.access_token_expiry_secs,
        config.refresh_token_expiry_secs,
        config.leeway_secs,
    )
    .map_err(|e| AuthError::Internal(format!("Failed to initialize JWT: {}", e)))
}

/// Normalize PEM key material from environment variables, where newlines
/// arrive as literal `\n` sequences and may be wrapped in quotes.
fn normalize_pem_key(key: &str) -> String {
    key.trim_matches('"')
        .trim_matches('\'')
        .replace("\\n", "\n")
}

/// Authentication service.
pub struct AuthService {
    pool: PgPool,
    jwt_config: JwtConfig,
    access_token_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given database pool and JWT
    /// configuration.
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            pool,
            jwt_config: build_jwt_config(jwt_config)?,
            access_token_expiry: jwt_config.access_token_expiry_secs,
        })
    }

    /// Register a new user with email and password.
    ///
    /// Creates the user and its profile row, records the signup invite
    /// code (if any) on the user for the auth callback to redeem, and
    /// mints the one-time auth code the confirmation link carries.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        invite_code: Option<&str>,
    ) -> Result<RegisterResult, AuthError> {
        validate_password_strength(password).map_err(|e| {
            AuthError::WeakPassword(e.message.map(|m| m.to_string()).unwrap_or_default())
        })?;

        let password_hash = hash_password(password)?;
        let email = email.to_lowercase();

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user_id = Uuid::new_v4();
        let signup_invite_code = invite_code
            .map(normalize_invite_code)
            .filter(|c| !c.is_empty());

        let insert_result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, display_name, is_active, email_verified, signup_invite_code)
            VALUES ($1, $2, $3, $4, true, false, $5)
            "#,
        )
        .bind(user_id)
        .bind(&email)
        .bind(&password_hash)
        .bind(display_name)
        .bind(&signup_invite_code)
        .execute(&self.pool)
        .await;

        // Unique violation means a concurrent registration won the race.
        if let Err(sqlx::Error::Database(db_err)) = &insert_result {
            if db_err.code().as_deref() == Some("23505") {
                return Err(AuthError::EmailAlreadyExists);
            }
        }
        insert_result?;

        // Profile row carries the snapshot fields used for contact cards.
        let profile_repo = ProfileRepository::new(self.pool.clone());
        profile_repo.create(user_id, display_name, &email).await?;

        let auth_code = self.create_auth_code(user_id).await?;

        Ok(RegisterResult {
            user_id,
            email,
            display_name: display_name.to_string(),
            auth_code,
        })
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, is_active, email_verified
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        let user = match user {
            Some(u) => u,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let password_hash = user.password_hash.ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        let tokens = self.generate_tokens(user.id)?;
        self.create_session(user.id, &tokens).await?;

        Ok(AuthResult {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            email_verified: user.email_verified,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_in: self.access_token_expiry,
        })
    }

    /// Exchange a one-time authorization code for a session.
    ///
    /// The code is consumed with a `used_at IS NULL` conditional update
    /// so two concurrent exchanges cannot both succeed. A successful
    /// exchange also marks the user's email as verified.
    pub async fn exchange_code(&self, raw_code: &str) -> Result<AuthResult, AuthError> {
        let code_hash = sha256_hex(raw_code.trim());

        let row: Option<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT id, user_id FROM auth_codes
            WHERE code_hash = $1 AND used_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(&code_hash)
        .fetch_optional(&self.pool)
        .await?;

        let (code_id, user_id) = row.ok_or(AuthError::InvalidAuthCode)?;

        let claimed = sqlx::query(
            r#"
            UPDATE auth_codes
            SET used_at = NOW()
            WHERE id = $1 AND used_at IS NULL
            "#,
        )
        .bind(code_id)
        .execute(&self.pool)
        .await?;

        if claimed.rows_affected() == 0 {
            return Err(AuthError::InvalidAuthCode);
        }

        sqlx::query(
            "UPDATE users SET email_verified = true, last_login_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let user: UserRow = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, is_active, email_verified
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let tokens = self.generate_tokens(user.id)?;
        self.create_session(user.id, &tokens).await?;

        Ok(AuthResult {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            email_verified: true,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_in: self.access_token_expiry,
        })
    }

    /// Rotate a refresh token into a fresh session.
    ///
    /// The presented token must be a valid refresh JWT with a live
    /// session row; the old session is deleted before the new pair is
    /// issued, so a stolen-then-replayed token dies on first rotation.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthResult, AuthError> {
        let claims = self
            .jwt_config
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;
        let user_id = extract_user_id(&claims).map_err(|_| AuthError::InvalidRefreshToken)?;

        let session: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM user_sessions
            WHERE refresh_token_hash = $1 AND user_id = $2 AND expires_at > NOW()
            "#,
        )
        .bind(sha256_hex(refresh_token))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (session_id,) = session.ok_or(AuthError::InvalidRefreshToken)?;

        sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        let user: UserRow = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, is_active, email_verified
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let tokens = self.generate_tokens(user.id)?;
        self.create_session(user.id, &tokens).await?;

        Ok(AuthResult {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            email_verified: user.email_verified,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_in: self.access_token_expiry,
        })
    }

    /// Reads the invite code captured at signup, if it has not been
    /// cleared yet.
    pub async fn signup_invite_code(&self, user_id: Uuid) -> Result<Option<String>, AuthError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT signup_invite_code FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(code,)| code))
    }

    /// Clears the signup invite code so the same signup-time code cannot
    /// be redeemed twice.
    pub async fn clear_signup_invite_code(&self, user_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET signup_invite_code = NULL WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_auth_code(&self, user_id: Uuid) -> Result<String, AuthError> {
        let code = generate_opaque_token(AUTH_CODE_LEN);
        let expires_at = Utc::now() + Duration::minutes(AUTH_CODE_EXPIRY_MINUTES);

        sqlx::query(
            r#"
            INSERT INTO auth_codes (user_id, code_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(sha256_hex(&code))
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(code)
    }

    fn generate_tokens(&self, user_id: Uuid) -> Result<TokenPair, AuthError> {
        let (access_token, _) = self.jwt_config.generate_access_token(user_id)?;
        let (refresh_token, _) = self.jwt_config.generate_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn create_session(&self, user_id: Uuid, tokens: &TokenPair) -> Result<(), AuthError> {
        let expires_at =
            Utc::now() + Duration::seconds(self.jwt_config.refresh_token_expiry_secs);

        sqlx::query(
            r#"
            INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(sha256_hex(&tokens.refresh_token))
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pem_key_literal_newlines() {
        let raw = "-----BEGIN KEY-----\\nabc\\n-----END KEY-----";
        let normalized = normalize_pem_key(raw);
        assert_eq!(normalized.matches('\n').count(), 2);
        assert!(!normalized.contains("\\n"));
    }

    #[test]
    fn test_normalize_pem_key_strips_quotes() {
        assert_eq!(normalize_pem_key("\"abc\""), "abc");
        assert_eq!(normalize_pem_key("'abc'"), "abc");
    }

    #[test]
    fn test_normalize_pem_key_passthrough() {
        let key = "-----BEGIN KEY-----\nabc\n-----END KEY-----";
        assert_eq!(normalize_pem_key(key), key);
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::EmailAlreadyExists.to_string(),
            "Email already registered"
        );
        assert_eq!(
            AuthError::InvalidAuthCode.to_string(),
            "Invalid or expired authorization code"
        );
    }
}
