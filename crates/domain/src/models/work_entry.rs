//! Work entry domain models.
//!
//! Career rows on a profile; the `chronicle_note` field carries the
//! chronicle annotation shown alongside the timeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::pagination::{clamp_page, clamp_per_page, Pagination};

/// Work entry in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryResponse {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub started_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronicle_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a work entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Company must be 1-100 characters"))]
    pub company: String,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    pub started_on: NaiveDate,

    pub ended_on: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "Summary must be at most 2000 characters"))]
    pub summary: Option<String>,

    #[validate(length(max = 500, message = "Chronicle note must be at most 500 characters"))]
    pub chronicle_note: Option<String>,
}

impl CreateWorkEntryRequest {
    /// An entry cannot end before it starts.
    pub fn dates_are_ordered(&self) -> bool {
        match self.ended_on {
            Some(ended) => ended >= self.started_on,
            None => true,
        }
    }
}

/// Request to update a work entry. Fields left out are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Company must be 1-100 characters"))]
    pub company: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    pub started_on: Option<NaiveDate>,

    pub ended_on: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "Summary must be at most 2000 characters"))]
    pub summary: Option<String>,

    #[validate(length(max = 500, message = "Chronicle note must be at most 500 characters"))]
    pub chronicle_note: Option<String>,
}

/// Query parameters for listing work entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkEntriesQuery {
    /// Page number (default: 1).
    pub page: Option<i64>,

    /// Items per page (default: 50, max: 100).
    pub per_page: Option<i64>,
}

impl ListWorkEntriesQuery {
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

/// Response for listing work entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkEntriesResponse {
    pub entries: Vec<WorkEntryResponse>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateWorkEntryRequest {
        CreateWorkEntryRequest {
            company: "Initech".to_string(),
            title: "Staff Engineer".to_string(),
            started_on: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            ended_on: Some(NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()),
            summary: Some("TPS report pipeline".to_string()),
            chronicle_note: Some("The printer incident".to_string()),
        }
    }

    #[test]
    fn test_create_work_entry_valid() {
        let request = valid_request();
        assert!(request.validate().is_ok());
        assert!(request.dates_are_ordered());
    }

    #[test]
    fn test_create_work_entry_unordered_dates() {
        let mut request = valid_request();
        request.ended_on = Some(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert!(!request.dates_are_ordered());
    }

    #[test]
    fn test_create_work_entry_open_ended() {
        let mut request = valid_request();
        request.ended_on = None;
        assert!(request.dates_are_ordered());
    }

    #[test]
    fn test_create_work_entry_empty_company() {
        let mut request = valid_request();
        request.company = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_work_entry_all_optional() {
        assert!(UpdateWorkEntryRequest::default().validate().is_ok());
    }
}
