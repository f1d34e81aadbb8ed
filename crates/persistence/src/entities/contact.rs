//! Contact entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{ContactResponse, RelationshipType};

/// Database row mapping for the contacts table.
///
/// Owner-scoped card describing another person. `linked_profile_id` is
/// set when the described person is a platform user; the partial unique
/// index on (owner_id, linked_profile_id) makes linked cards upsertable
/// on their natural key.
#[derive(Debug, Clone, FromRow)]
pub struct ContactEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub linked_profile_id: Option<Uuid>,
    pub full_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub relationship_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactEntity {
    /// Parsed relationship type; unknown strings fall back to `Other`.
    pub fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
            .parse()
            .unwrap_or(RelationshipType::Other)
    }

    /// Check whether this card is linked to a platform profile.
    pub fn is_linked(&self) -> bool {
        self.linked_profile_id.is_some()
    }

    pub fn into_response(self) -> ContactResponse {
        let relationship_type = self.relationship_type();
        ContactResponse {
            id: self.id,
            owner_id: self.owner_id,
            linked_profile_id: self.linked_profile_id,
            full_name: self.full_name,
            email: self.email,
            avatar_url: self.avatar_url,
            location: self.location,
            bio: self.bio,
            website: self.website,
            relationship_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
