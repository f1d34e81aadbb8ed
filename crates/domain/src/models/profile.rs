//! Profile domain models.
//!
//! A profile is the public face of a user: the display and contact fields
//! used to materialize contact cards when a connection is accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_website;

/// Profile in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request to update the caller's own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "validate_optional_website"))]
    pub website: Option<String>,
}

fn validate_optional_website(website: &str) -> Result<(), validator::ValidationError> {
    validate_website(website)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            full_name: "Ada Lovelace".to_string(),
            avatar_url: Some("https://cdn.example.com/ada.png".to_string()),
            location: Some("London".to_string()),
            bio: Some("Analyst and metaphysician.".to_string()),
            website: Some("https://ada.example.com".to_string()),
        }
    }

    #[test]
    fn test_update_profile_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_update_profile_request_empty_name() {
        let mut request = valid_request();
        request.full_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_long_bio() {
        let mut request = valid_request();
        request.bio = Some("x".repeat(1001));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_bad_website() {
        let mut request = valid_request();
        request.website = Some("gopher://old.example.com".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_optional_fields_absent() {
        let request = UpdateProfileRequest {
            full_name: "Ada Lovelace".to_string(),
            avatar_url: None,
            location: None,
            bio: None,
            website: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_profile_response_serialization_camel_case() {
        let response = ProfileResponse {
            user_id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: None,
            location: None,
            bio: None,
            website: None,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"fullName\""));
        assert!(!json.contains("\"avatarUrl\""));
    }
}
