//! Synergy note generation route.

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;
use validator::Validate;

use domain::models::SynergyRequest;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::synergy::{SynergyClient, SynergyError};

/// POST /api/ai/synergy
///
/// Drafts talking points between the caller and a counterpart from the
/// two profiles' textual fields. Upstream failures surface as a 500 with
/// the raw status and body embedded; no retry is attempted.
pub async fn generate_synergy(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<SynergyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let client = SynergyClient::new(&state.config.synergy).map_err(map_synergy_error)?;

    let sections = client
        .generate(&request.me, &request.them)
        .await
        .map_err(map_synergy_error)?;

    info!(user_id = %auth.user_id, "Generated synergy note");

    Ok(Json(sections))
}

fn map_synergy_error(e: SynergyError) -> ApiError {
    match e {
        SynergyError::NotConfigured => ApiError::Upstream(e.to_string()),
        SynergyError::Http(err) => {
            ApiError::Upstream(format!("Synergy upstream request failed: {}", err))
        }
        SynergyError::Upstream { .. } | SynergyError::InvalidResponse(_) => {
            ApiError::Upstream(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_not_configured_is_upstream() {
        let error = map_synergy_error(SynergyError::NotConfigured);
        assert!(matches!(error, ApiError::Upstream(_)));
    }

    #[test]
    fn test_map_upstream_keeps_diagnostics() {
        let error = map_synergy_error(SynergyError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        });
        match error {
            ApiError::Upstream(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            _ => panic!("Expected Upstream error"),
        }
    }
}
