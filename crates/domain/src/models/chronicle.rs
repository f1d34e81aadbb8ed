//! Chronicle domain models.
//!
//! The chronicle is a per-user timeline of life and work events,
//! optionally pinned to a named place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::pagination::{clamp_page, clamp_per_page, Pagination};

/// Kind of chronicle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChronicleKind {
    Life,
    Work,
}

impl ChronicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChronicleKind::Life => "life",
            ChronicleKind::Work => "work",
        }
    }
}

impl std::str::FromStr for ChronicleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "life" => Ok(ChronicleKind::Life),
            "work" => Ok(ChronicleKind::Work),
            other => Err(format!("Invalid chronicle kind: {}", other)),
        }
    }
}

/// Chronicle entry in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronicleEntryResponse {
    pub id: Uuid,
    pub kind: ChronicleKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub happened_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a chronicle entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChronicleEntryRequest {
    pub kind: ChronicleKind,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub happened_on: NaiveDate,

    pub place_id: Option<Uuid>,
}

/// Request to update a chronicle entry. Fields left out are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChronicleEntryRequest {
    pub kind: Option<ChronicleKind>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub happened_on: Option<NaiveDate>,

    pub place_id: Option<Uuid>,
}

/// Query parameters for listing chronicle entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChronicleEntriesQuery {
    /// Filter by kind: "life" or "work" (default: both).
    pub kind: Option<String>,

    /// Page number (default: 1).
    pub page: Option<i64>,

    /// Items per page (default: 50, max: 100).
    pub per_page: Option<i64>,
}

impl ListChronicleEntriesQuery {
    pub fn kind_filter(&self) -> Option<ChronicleKind> {
        self.kind.as_deref().and_then(|k| k.parse().ok())
    }

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

/// Response for listing chronicle entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChronicleEntriesResponse {
    pub entries: Vec<ChronicleEntryResponse>,
    pub pagination: Pagination,
}

/// Chronicle place in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChroniclePlaceResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a chronicle place.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChroniclePlaceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Locality must be at most 100 characters"))]
    pub locality: Option<String>,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_chronicle_kind_roundtrip() {
        assert_eq!(ChronicleKind::from_str("life").unwrap(), ChronicleKind::Life);
        assert_eq!(ChronicleKind::from_str("work").unwrap(), ChronicleKind::Work);
        assert!(ChronicleKind::from_str("dream").is_err());
    }

    #[test]
    fn test_create_entry_request_valid() {
        let request = CreateChronicleEntryRequest {
            kind: ChronicleKind::Life,
            title: "Moved to Berlin".to_string(),
            description: None,
            happened_on: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            place_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_entry_request_empty_title() {
        let request = CreateChronicleEntryRequest {
            kind: ChronicleKind::Life,
            title: String::new(),
            description: None,
            happened_on: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            place_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_query_kind_filter() {
        let query = ListChronicleEntriesQuery {
            kind: Some("work".to_string()),
            ..ListChronicleEntriesQuery::default()
        };
        assert_eq!(query.kind_filter(), Some(ChronicleKind::Work));

        let bogus = ListChronicleEntriesQuery {
            kind: Some("bogus".to_string()),
            ..ListChronicleEntriesQuery::default()
        };
        assert!(bogus.kind_filter().is_none());
    }

    #[test]
    fn test_create_place_request_validation() {
        let ok = CreateChroniclePlaceRequest {
            name: "Cafe Einstein".to_string(),
            locality: Some("Berlin".to_string()),
            note: None,
        };
        assert!(ok.validate().is_ok());

        let bad = CreateChroniclePlaceRequest {
            name: String::new(),
            locality: None,
            note: None,
        };
        assert!(bad.validate().is_err());
    }
}
