//! Contact routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::contact::ListContactsResponse;
use domain::models::{
    ContactResponse, CreateContactRequest, ListContactsQuery, Pagination, UpdateContactRequest,
};
use persistence::repositories::ContactRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// POST /api/v1/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let contact_repo = ContactRepository::new(state.pool.clone());
    let entity = contact_repo.create(auth.user_id, &request).await?;

    info!(
        owner_id = %auth.user_id,
        contact_id = %entity.id,
        "Created contact"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// GET /api/v1/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListContactsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_repo = ContactRepository::new(state.pool.clone());
    let linked_only = query.linked_only.unwrap_or(false);

    let entities = contact_repo
        .list_by_owner(auth.user_id, linked_only, query.per_page(), query.offset())
        .await?;

    let total = contact_repo.count_by_owner(auth.user_id, linked_only).await?;

    let contacts: Vec<ContactResponse> = entities
        .into_iter()
        .map(|entity| entity.into_response())
        .collect();

    Ok(Json(ListContactsResponse {
        contacts,
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/contacts/:contact_id
pub async fn get_contact(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(contact_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_repo = ContactRepository::new(state.pool.clone());

    let entity = contact_repo
        .find_by_id_and_owner(contact_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// PUT /api/v1/contacts/:contact_id
pub async fn update_contact(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(contact_id): Path<Uuid>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let contact_repo = ContactRepository::new(state.pool.clone());

    let entity = contact_repo
        .update(contact_id, auth.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// DELETE /api/v1/contacts/:contact_id
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(contact_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_repo = ContactRepository::new(state.pool.clone());

    let deleted = contact_repo.delete(contact_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Contact not found".to_string()));
    }

    info!(
        owner_id = %auth.user_id,
        contact_id = %contact_id,
        "Deleted contact"
    );

    Ok(StatusCode::NO_CONTENT)
}
