//! Authentication routes: registration, login and the auth callback.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::{AuthError, AuthService};
use crate::services::redemption::RedemptionService;

/// Default post-login destination for the callback redirect.
const DEFAULT_NEXT: &str = "/dashboard";

/// Destination when the callback exchange fails.
const LOGIN_ERROR_PATH: &str = "/login?error=auth_callback_failed";

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// User's password (min 8 chars, 1 upper, 1 lower, 1 digit)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// User's display name
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    /// Invite code the user signed up with, redeemed at the callback
    pub invite_code: Option<String>,
}

/// Response body for successful registration.
///
/// The confirmation URL carries the one-time auth code; following it
/// completes the signup through the callback endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub confirmation_url: String,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
}

/// Token information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response body for successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

/// Query parameters for the auth callback.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub next: Option<String>,
}

/// Request body for token refresh. The token may instead arrive in the
/// refresh cookie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Register a new user with email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .register(
            &request.email,
            &request.password,
            &request.display_name,
            request.invite_code.as_deref(),
        )
        .await
        .map_err(map_auth_error)?;

    let confirmation_url = format!(
        "{}/auth/callback?code={}",
        state.config.server.app_base_url, result.auth_code
    );

    // Console delivery; a mail provider would send this instead.
    info!(
        user_id = %result.user_id,
        email = %result.email,
        confirmation_url = %confirmation_url,
        "Registered user, confirmation link issued"
    );

    let response = RegisterResponse {
        user_id: result.user_id.to_string(),
        email: result.email,
        display_name: result.display_name,
        confirmation_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .login(&request.email, &request.password)
        .await
        .map_err(map_auth_error)?;

    let mut headers = HeaderMap::new();
    state
        .cookies
        .add_token_cookies(&mut headers, &result.access_token, &result.refresh_token);

    let response = LoginResponse {
        user: UserResponse {
            id: result.user_id.to_string(),
            email: result.email,
            display_name: result.display_name,
            email_verified: result.email_verified,
        },
        tokens: TokensResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: result.access_token_expires_in,
        },
    };

    Ok((headers, Json(response)))
}

/// Rotate a refresh token into a fresh session.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    request_headers: HeaderMap,
    Json(request): Json<RefreshRequest>,
) -> Result<(HeaderMap, Json<TokensResponse>), ApiError> {
    let refresh_token = request
        .refresh_token
        .as_deref()
        .or_else(|| state.cookies.extract_refresh_token(&request_headers))
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .refresh_session(refresh_token)
        .await
        .map_err(map_auth_error)?;

    let mut headers = HeaderMap::new();
    state
        .cookies
        .add_token_cookies(&mut headers, &result.access_token, &result.refresh_token);

    Ok((
        headers,
        Json(TokensResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: result.access_token_expires_in,
        }),
    ))
}

/// Auth callback: exchange a one-time code for a session.
///
/// GET /api/v1/auth/callback?code&next
///
/// On success, if the user signed up with an invite code, redemption is
/// triggered server-side before redirecting. Redemption problems never
/// block the login: each outcome is logged and the navigation proceeds.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> (HeaderMap, Redirect) {
    let mut headers = HeaderMap::new();

    let auth_service = match AuthService::new(state.pool.clone(), &state.config.jwt) {
        Ok(service) => service,
        Err(e) => {
            warn!("Failed to initialize auth service: {}", e);
            return (headers, Redirect::to(LOGIN_ERROR_PATH));
        }
    };

    let result = match auth_service.exchange_code(&query.code).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Auth callback exchange failed: {}", e);
            return (headers, Redirect::to(LOGIN_ERROR_PATH));
        }
    };

    // Redeem the signup-time invite code, then clear it so it cannot
    // fire twice. Nothing in this block may abort the login.
    match auth_service.signup_invite_code(result.user_id).await {
        Ok(Some(invite_code)) => {
            let redemption = RedemptionService::new(state.pool.clone());
            match redemption.redeem(result.user_id, &invite_code).await {
                Ok(outcome) => {
                    info!(
                        user_id = %result.user_id,
                        outcome = outcome.as_str(),
                        "Signup invite redemption finished"
                    );
                }
                Err(e) => {
                    warn!(
                        user_id = %result.user_id,
                        "Signup invite redemption failed: {}", e
                    );
                }
            }
            if let Err(e) = auth_service.clear_signup_invite_code(result.user_id).await {
                warn!(
                    user_id = %result.user_id,
                    "Failed to clear signup invite code: {}", e
                );
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(
                user_id = %result.user_id,
                "Failed to read signup invite code: {}", e
            );
        }
    }

    state
        .cookies
        .add_token_cookies(&mut headers, &result.access_token, &result.refresh_token);

    let next = sanitize_next(query.next.as_deref());
    (headers, Redirect::to(&next))
}

/// Only same-site relative paths are allowed as redirect targets.
fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => DEFAULT_NEXT.to_string(),
    }
}

fn map_auth_error(e: AuthError) -> ApiError {
    match e {
        AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".to_string()),
        AuthError::WeakPassword(msg) => ApiError::Validation(msg),
        AuthError::InvalidCredentials => {
            ApiError::Unauthorized("Invalid email or password".to_string())
        }
        AuthError::UserDisabled => ApiError::Forbidden("Account is disabled".to_string()),
        AuthError::InvalidAuthCode => {
            ApiError::Unauthorized("Invalid or expired authorization code".to_string())
        }
        AuthError::InvalidRefreshToken => {
            ApiError::Unauthorized("Invalid refresh token".to_string())
        }
        AuthError::DatabaseError(db_err) => ApiError::from(db_err),
        AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
        AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        AuthError::Internal(msg) => ApiError::Internal(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "SecureP4ss".to_string(),
            display_name: "Test User".to_string(),
            invite_code: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "SecureP4ss".to_string(),
            display_name: "Test User".to_string(),
            invite_code: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_empty_display_name() {
        let request = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "SecureP4ss".to_string(),
            display_name: String::new(),
            invite_code: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let request = LoginRequest {
            email: "test@example.com".to_string(),
            password: "SecureP4ss".to_string(),
        };
        assert!(request.validate().is_ok());

        let empty = LoginRequest {
            email: "test@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_sanitize_next_default() {
        assert_eq!(sanitize_next(None), DEFAULT_NEXT);
    }

    #[test]
    fn test_sanitize_next_relative_path() {
        assert_eq!(sanitize_next(Some("/contacts")), "/contacts");
    }

    #[test]
    fn test_sanitize_next_rejects_absolute_urls() {
        assert_eq!(sanitize_next(Some("https://evil.example.com")), DEFAULT_NEXT);
        assert_eq!(sanitize_next(Some("//evil.example.com")), DEFAULT_NEXT);
        assert_eq!(sanitize_next(Some("evil")), DEFAULT_NEXT);
    }

    #[test]
    fn test_map_auth_error_conflict() {
        let error = map_auth_error(AuthError::EmailAlreadyExists);
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_map_auth_error_unauthorized() {
        let error = map_auth_error(AuthError::InvalidCredentials);
        assert!(matches!(error, ApiError::Unauthorized(_)));
    }
}
