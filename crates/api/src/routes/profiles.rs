//! Profile routes.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::UpdateProfileRequest;
use persistence::repositories::ProfileRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// GET /api/v1/profiles/me
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile_repo = ProfileRepository::new(state.pool.clone());

    let profile = profile_repo
        .find_by_user_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into_response()))
}

/// PUT /api/v1/profiles/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let profile_repo = ProfileRepository::new(state.pool.clone());

    let profile = profile_repo
        .update(auth.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into_response()))
}

/// GET /api/v1/profiles/:user_id
///
/// Profiles are visible to any authenticated user; they are the public
/// face contact cards are built from.
pub async fn get_profile(
    State(state): State<AppState>,
    _auth: UserAuth,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile_repo = ProfileRepository::new(state.pool.clone());

    let profile = profile_repo
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into_response()))
}
