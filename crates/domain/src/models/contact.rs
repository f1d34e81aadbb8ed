//! Contact domain models.
//!
//! A contact is a directional, owner-scoped card describing another
//! person. When that person is also a platform user the card carries a
//! `linked_profile_id`; redemption guarantees a linked card in each
//! direction for every accepted connection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::pagination::{clamp_page, clamp_per_page, Pagination};

/// Relationship category recorded on a contact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Connection,
    Friend,
    Family,
    Colleague,
    Other,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Connection => "connection",
            RelationshipType::Friend => "friend",
            RelationshipType::Family => "family",
            RelationshipType::Colleague => "colleague",
            RelationshipType::Other => "other",
        }
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connection" => Ok(RelationshipType::Connection),
            "friend" => Ok(RelationshipType::Friend),
            "family" => Ok(RelationshipType::Family),
            "colleague" => Ok(RelationshipType::Colleague),
            "other" => Ok(RelationshipType::Other),
            other => Err(format!("Invalid relationship type: {}", other)),
        }
    }
}

impl Default for RelationshipType {
    fn default() -> Self {
        RelationshipType::Other
    }
}

/// Contact card in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_profile_id: Option<Uuid>,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub relationship_type: RelationshipType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a contact card.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    pub website: Option<String>,

    #[serde(default)]
    pub relationship_type: RelationshipType,
}

/// Request to update a contact card. Fields left out are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    pub website: Option<String>,

    pub relationship_type: Option<RelationshipType>,
}

/// Query parameters for listing contacts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsQuery {
    /// Only cards linked to a platform profile when true.
    pub linked_only: Option<bool>,

    /// Page number (default: 1).
    pub page: Option<i64>,

    /// Items per page (default: 50, max: 100).
    pub per_page: Option<i64>,
}

impl ListContactsQuery {
    /// Get the page number (1-indexed).
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    /// Get items per page (clamped).
    pub fn per_page(&self) -> i64 {
        clamp_per_page(self.per_page)
    }

    /// Get the offset for pagination.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// Response for listing contacts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsResponse {
    pub contacts: Vec<ContactResponse>,
    pub pagination: Pagination,
}
