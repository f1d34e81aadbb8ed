//! Connection routes: invite creation, listing and redemption.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    ConnectionResponse, CreateInviteRequest, CreateInviteResponse, ListConnectionsQuery,
    RedeemInviteRequest, RedeemInviteResponse,
};
use persistence::entities::ConnectionEntity;
use persistence::repositories::{generate_invite_code, ConnectionRepository, ContactRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::redemption::RedemptionService;

/// Attempts at finding an unused invite code before giving up.
const CODE_GENERATION_ATTEMPTS: u32 = 5;

/// POST /api/v1/connections/invites
///
/// Create a pending connection with a fresh invite code. The code is
/// shown in full only here.
pub async fn create_invite(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateInviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let connection_repo = ConnectionRepository::new(state.pool.clone());

    // The placeholder card must exist, belong to the inviter, and not be
    // linked to a platform profile yet.
    if let Some(contact_id) = request.contact_id {
        let contact_repo = ContactRepository::new(state.pool.clone());
        let contact = contact_repo
            .find_by_id_and_owner(contact_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

        if contact.is_linked() {
            return Err(ApiError::Conflict(
                "Contact is already linked to a profile".to_string(),
            ));
        }
    }

    let mut invite_code = generate_invite_code();
    let mut attempts = 1;
    while connection_repo.code_exists(&invite_code).await? {
        if attempts >= CODE_GENERATION_ATTEMPTS {
            return Err(ApiError::Internal(
                "Failed to generate a unique invite code".to_string(),
            ));
        }
        invite_code = generate_invite_code();
        attempts += 1;
    }

    let entity = connection_repo
        .create(auth.user_id, &invite_code, request.contact_id)
        .await?;

    info!(
        inviter_id = %auth.user_id,
        connection_id = %entity.id,
        "Created connection invite"
    );

    let invite_url = format!(
        "{}/invite/{}",
        state.config.server.app_base_url, invite_code
    );

    let response = CreateInviteResponse {
        id: entity.id,
        invite_code,
        invite_url,
        status: entity.status(),
        created_at: entity.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/connections
///
/// List connections where the caller is inviter or invitee.
pub async fn list_connections(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListConnectionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let connection_repo = ConnectionRepository::new(state.pool.clone());

    let entities = connection_repo
        .list_for_user(auth.user_id, query.status_filter())
        .await?;

    let connections: Vec<ConnectionResponse> =
        entities.into_iter().map(entity_to_response).collect();

    Ok(Json(connections))
}

/// POST /api/v1/connections/redeem
///
/// Client-triggered redemption: the user typed an invite code during an
/// interactive login. Unlike the auth-callback path, the outcome is
/// returned to the caller as a structured success/error result.
pub async fn redeem_invite(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<RedeemInviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let redemption = RedemptionService::new(state.pool.clone());
    let outcome = redemption.redeem(auth.user_id, &request.code).await?;

    info!(
        user_id = %auth.user_id,
        outcome = outcome.as_str(),
        "Client-triggered invite redemption finished"
    );

    let response = RedeemInviteResponse {
        success: outcome.is_accepted(),
        error: outcome.client_error().map(|e| e.to_string()),
    };

    Ok(Json(response))
}

/// Convert entity to response.
fn entity_to_response(entity: ConnectionEntity) -> ConnectionResponse {
    let status = entity.status();
    ConnectionResponse {
        id: entity.id,
        invite_code: entity.invite_code,
        inviter_id: entity.inviter_id,
        invitee_id: entity.invitee_id,
        contact_id: entity.contact_id,
        status,
        accepted_at: entity.accepted_at,
        created_at: entity.created_at,
    }
}
