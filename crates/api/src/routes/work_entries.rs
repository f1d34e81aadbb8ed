//! Work entry routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::work_entry::ListWorkEntriesResponse;
use domain::models::{
    CreateWorkEntryRequest, ListWorkEntriesQuery, Pagination, UpdateWorkEntryRequest,
    WorkEntryResponse,
};
use persistence::repositories::WorkEntryRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// POST /api/v1/work-entries
pub async fn create_work_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateWorkEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if !request.dates_are_ordered() {
        return Err(ApiError::Validation(
            "End date cannot precede start date".to_string(),
        ));
    }

    let work_repo = WorkEntryRepository::new(state.pool.clone());
    let entity = work_repo.create(auth.user_id, &request).await?;

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// GET /api/v1/work-entries
pub async fn list_work_entries(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListWorkEntriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let work_repo = WorkEntryRepository::new(state.pool.clone());

    let entities = work_repo
        .list_by_user(auth.user_id, query.per_page(), query.offset())
        .await?;

    let total = work_repo.count_by_user(auth.user_id).await?;

    let entries: Vec<WorkEntryResponse> = entities
        .into_iter()
        .map(|entity| entity.into_response())
        .collect();

    Ok(Json(ListWorkEntriesResponse {
        entries,
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// PUT /api/v1/work-entries/:entry_id
pub async fn update_work_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateWorkEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let work_repo = WorkEntryRepository::new(state.pool.clone());

    let entity = work_repo
        .update(entry_id, auth.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Work entry not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// DELETE /api/v1/work-entries/:entry_id
pub async fn delete_work_entry(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let work_repo = WorkEntryRepository::new(state.pool.clone());

    let deleted = work_repo.delete(entry_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Work entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
