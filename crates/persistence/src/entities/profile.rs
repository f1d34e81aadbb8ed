//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ProfileResponse;

/// Database row mapping for the profiles table.
///
/// One row per user; the snapshot fields feed contact card
/// materialization during invite redemption.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileEntity {
    pub fn into_response(self) -> ProfileResponse {
        ProfileResponse {
            user_id: self.user_id,
            full_name: self.full_name,
            email: self.email,
            avatar_url: self.avatar_url,
            location: self.location,
            bio: self.bio,
            website: self.website,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_maps_all_fields() {
        let user_id = Uuid::new_v4();
        let entity = ProfileEntity {
            user_id,
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: Some("https://cdn.example.com/ada.png".to_string()),
            location: Some("London".to_string()),
            bio: None,
            website: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = entity.into_response();
        assert_eq!(response.user_id, user_id);
        assert_eq!(response.full_name, "Ada Lovelace");
        assert_eq!(response.email, "ada@example.com");
        assert_eq!(
            response.avatar_url.as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
        assert!(response.bio.is_none());
    }
}
