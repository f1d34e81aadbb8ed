//! Connection domain models.
//!
//! A connection records an invite relationship between an inviter and an
//! invitee. It is created pending when the inviter generates a code and
//! transitions to accepted exactly once, during invite redemption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Prefix carried by every invite code.
pub const INVITE_CODE_PREFIX: &str = "NEXUS-";

/// Number of random characters after the prefix.
pub const INVITE_CODE_SUFFIX_LEN: usize = 6;

/// Normalizes a user-supplied invite code for lookup.
///
/// Codes are matched case-insensitively with surrounding whitespace
/// ignored; the stored form is upper-case.
pub fn normalize_invite_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Connection lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
        }
    }
}

impl std::str::FromStr for ConnectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConnectionStatus::Pending),
            "accepted" => Ok(ConnectionStatus::Accepted),
            other => Err(format!("Invalid connection status: {}", other)),
        }
    }
}

/// Typed result of a redemption attempt.
///
/// Every precondition failure is its own variant so each entry point can
/// pick its propagation policy: the auth callback logs and moves on, the
/// client-facing endpoint maps the variant to a user-visible error.
/// Database failures travel separately as `sqlx::Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// The connection was accepted and both contact cards materialized.
    Accepted {
        connection_id: Uuid,
        contact_id: Uuid,
    },
    /// No pending connection matches the normalized code.
    CodeNotFound,
    /// The inviter tried to redeem their own code.
    SelfInvite,
    /// An accepted connection already exists between the two users,
    /// or a concurrent redemption of the same code won the race.
    AlreadyConnected,
    /// One of the two profile snapshots is missing.
    ProfileMissing,
}

impl RedemptionOutcome {
    /// Whether the attempt produced an accepted connection.
    pub fn is_accepted(&self) -> bool {
        matches!(self, RedemptionOutcome::Accepted { .. })
    }

    /// Error message for the client-triggered path; `None` on success.
    pub fn client_error(&self) -> Option<&'static str> {
        match self {
            RedemptionOutcome::Accepted { .. } => None,
            RedemptionOutcome::CodeNotFound => Some("Invite code not found or already used"),
            RedemptionOutcome::SelfInvite => Some("You cannot redeem your own invite code"),
            RedemptionOutcome::AlreadyConnected => Some("You are already connected to this person"),
            RedemptionOutcome::ProfileMissing => Some("Profile information is incomplete"),
        }
    }

    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionOutcome::Accepted { .. } => "accepted",
            RedemptionOutcome::CodeNotFound => "code_not_found",
            RedemptionOutcome::SelfInvite => "self_invite",
            RedemptionOutcome::AlreadyConnected => "already_connected",
            RedemptionOutcome::ProfileMissing => "profile_missing",
        }
    }
}

/// Request to create a new invite.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    /// Existing contact card of the inviter to use as a placeholder.
    /// Its `linked_profile_id` is filled in when the invite is redeemed.
    pub contact_id: Option<Uuid>,
}

/// Response after creating an invite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteResponse {
    pub id: Uuid,
    pub invite_code: String,
    pub invite_url: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

/// Connection in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse {
    pub id: Uuid,
    pub invite_code: String,
    pub inviter_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitee_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,
    pub status: ConnectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing connections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConnectionsQuery {
    /// Filter by status: "pending", "accepted" or "all" (default: "all").
    pub status: Option<String>,
}

impl ListConnectionsQuery {
    /// The status filter to push down to the store, if any.
    pub fn status_filter(&self) -> Option<ConnectionStatus> {
        match self.status.as_deref() {
            Some("pending") => Some(ConnectionStatus::Pending),
            Some("accepted") => Some(ConnectionStatus::Accepted),
            _ => None,
        }
    }
}

/// Request to redeem an invite code (client-triggered path).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemInviteRequest {
    #[validate(length(min = 1, max = 64, message = "Invite code is required"))]
    pub code: String,
}

/// Structured result of the client-triggered redemption path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemInviteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_normalize_invite_code_trims_and_uppercases() {
        assert_eq!(normalize_invite_code(" nexus-ab12cd "), "NEXUS-AB12CD");
        assert_eq!(normalize_invite_code("NEXUS-AB12CD"), "NEXUS-AB12CD");
    }

    #[test]
    fn test_normalize_invite_code_equivalence() {
        let a = normalize_invite_code(" nexus-7q2k9p ");
        let b = normalize_invite_code("NEXUS-7Q2K9P");
        assert_eq!(a, b);
    }

    #[test]
    fn test_connection_status_roundtrip() {
        assert_eq!(
            ConnectionStatus::from_str("pending").unwrap(),
            ConnectionStatus::Pending
        );
        assert_eq!(
            ConnectionStatus::from_str("accepted").unwrap(),
            ConnectionStatus::Accepted
        );
        assert!(ConnectionStatus::from_str("revoked").is_err());
        assert_eq!(ConnectionStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn test_redemption_outcome_accepted() {
        let outcome = RedemptionOutcome::Accepted {
            connection_id: Uuid::new_v4(),
            contact_id: Uuid::new_v4(),
        };
        assert!(outcome.is_accepted());
        assert!(outcome.client_error().is_none());
        assert_eq!(outcome.as_str(), "accepted");
    }

    #[test]
    fn test_redemption_outcome_failures_have_client_errors() {
        for outcome in [
            RedemptionOutcome::CodeNotFound,
            RedemptionOutcome::SelfInvite,
            RedemptionOutcome::AlreadyConnected,
            RedemptionOutcome::ProfileMissing,
        ] {
            assert!(!outcome.is_accepted());
            assert!(outcome.client_error().is_some());
        }
    }

    #[test]
    fn test_list_connections_query_status_filter() {
        let all = ListConnectionsQuery { status: None };
        assert!(all.status_filter().is_none());

        let pending = ListConnectionsQuery {
            status: Some("pending".to_string()),
        };
        assert_eq!(pending.status_filter(), Some(ConnectionStatus::Pending));

        let unknown = ListConnectionsQuery {
            status: Some("bogus".to_string()),
        };
        assert!(unknown.status_filter().is_none());
    }

    #[test]
    fn test_redeem_request_validation() {
        let ok = RedeemInviteRequest {
            code: "NEXUS-AB12CD".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = RedeemInviteRequest {
            code: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_redeem_response_serialization_omits_null_error() {
        let ok = RedeemInviteResponse {
            success: true,
            error: None,
        };
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"success":true}"#);

        let failed = RedeemInviteResponse {
            success: false,
            error: Some("Invite code not found or already used".to_string()),
        };
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("\"error\""));
    }
}
