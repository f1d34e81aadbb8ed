//! Connection entity (database row mapping).
//!
//! Records an invite relationship between an inviter and an invitee.
//! `invitee_id` stays NULL while the connection is pending and is set
//! atomically with the status flip to accepted.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ConnectionStatus;

/// Database row mapping for the connections table.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionEntity {
    pub id: Uuid,
    pub invite_code: String,
    pub inviter_id: Uuid,
    pub invitee_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub status: String,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ConnectionEntity {
    /// Parsed lifecycle status. Unknown strings count as pending; the
    /// check constraint on the column keeps them out in practice.
    pub fn status(&self) -> ConnectionStatus {
        self.status
            .parse()
            .unwrap_or(ConnectionStatus::Pending)
    }

    /// Check if this connection is still awaiting redemption.
    pub fn is_pending(&self) -> bool {
        self.status() == ConnectionStatus::Pending
    }

    /// Check if the given user would be redeeming their own invite.
    pub fn is_self_redemption(&self, user_id: Uuid) -> bool {
        self.inviter_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection(status: &str) -> ConnectionEntity {
        ConnectionEntity {
            id: Uuid::new_v4(),
            invite_code: "NEXUS-7Q2K9P".to_string(),
            inviter_id: Uuid::new_v4(),
            invitee_id: None,
            contact_id: None,
            status: status.to_string(),
            accepted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            create_test_connection("pending").status(),
            ConnectionStatus::Pending
        );
        assert_eq!(
            create_test_connection("accepted").status(),
            ConnectionStatus::Accepted
        );
    }

    #[test]
    fn test_is_pending() {
        assert!(create_test_connection("pending").is_pending());
        assert!(!create_test_connection("accepted").is_pending());
    }

    #[test]
    fn test_is_self_redemption() {
        let connection = create_test_connection("pending");
        assert!(connection.is_self_redemption(connection.inviter_id));
        assert!(!connection.is_self_redemption(Uuid::new_v4()));
    }
}
