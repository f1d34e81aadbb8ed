//! Chronicle routes: timeline entries and places.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::chronicle::ListChronicleEntriesResponse;
use domain::models::{
    ChronicleEntryResponse, ChroniclePlaceResponse, CreateChronicleEntryRequest,
    CreateChroniclePlaceRequest, ListChronicleEntriesQuery, Pagination,
    UpdateChronicleEntryRequest,
};
use persistence::repositories::{ChronicleEntryRepository, ChroniclePlaceRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// POST /api/v1/chronicle/entries
pub async fn create_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateChronicleEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // A referenced place must belong to the same user.
    if let Some(place_id) = request.place_id {
        let place_repo = ChroniclePlaceRepository::new(state.pool.clone());
        if place_repo
            .find_by_id_and_user(place_id, auth.user_id)
            .await?
            .is_none()
        {
            return Err(ApiError::NotFound("Place not found".to_string()));
        }
    }

    let entry_repo = ChronicleEntryRepository::new(state.pool.clone());
    let entity = entry_repo.create(auth.user_id, &request).await?;

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// GET /api/v1/chronicle/entries
pub async fn list_entries(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListChronicleEntriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entry_repo = ChronicleEntryRepository::new(state.pool.clone());
    let kind = query.kind_filter();

    let entities = entry_repo
        .list_by_user(auth.user_id, kind, query.per_page(), query.offset())
        .await?;

    let total = entry_repo.count_by_user(auth.user_id, kind).await?;

    let entries: Vec<ChronicleEntryResponse> = entities
        .into_iter()
        .map(|entity| entity.into_response())
        .collect();

    Ok(Json(ListChronicleEntriesResponse {
        entries,
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// PUT /api/v1/chronicle/entries/:entry_id
pub async fn update_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateChronicleEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if let Some(place_id) = request.place_id {
        let place_repo = ChroniclePlaceRepository::new(state.pool.clone());
        if place_repo
            .find_by_id_and_user(place_id, auth.user_id)
            .await?
            .is_none()
        {
            return Err(ApiError::NotFound("Place not found".to_string()));
        }
    }

    let entry_repo = ChronicleEntryRepository::new(state.pool.clone());

    let entity = entry_repo
        .update(entry_id, auth.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chronicle entry not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// DELETE /api/v1/chronicle/entries/:entry_id
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let entry_repo = ChronicleEntryRepository::new(state.pool.clone());

    let deleted = entry_repo.delete(entry_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Chronicle entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/chronicle/places
pub async fn create_place(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateChroniclePlaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let place_repo = ChroniclePlaceRepository::new(state.pool.clone());
    let entity = place_repo.create(auth.user_id, &request).await?;

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// GET /api/v1/chronicle/places
pub async fn list_places(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let place_repo = ChroniclePlaceRepository::new(state.pool.clone());

    let entities = place_repo.list_by_user(auth.user_id).await?;
    let places: Vec<ChroniclePlaceResponse> = entities
        .into_iter()
        .map(|entity| entity.into_response())
        .collect();

    Ok(Json(places))
}

/// DELETE /api/v1/chronicle/places/:place_id
///
/// Entries referencing the place keep existing with their place cleared.
pub async fn delete_place(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(place_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let place_repo = ChroniclePlaceRepository::new(state.pool.clone());

    let deleted = place_repo.delete(place_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Place not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
