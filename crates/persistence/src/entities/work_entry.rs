//! Work entry entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::WorkEntryResponse;

/// Database row mapping for the work_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkEntryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub title: String,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    pub summary: Option<String>,
    pub chronicle_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkEntryEntity {
    /// Check if this is the user's current position.
    pub fn is_current(&self) -> bool {
        self.ended_on.is_none()
    }

    pub fn into_response(self) -> WorkEntryResponse {
        WorkEntryResponse {
            id: self.id,
            company: self.company,
            title: self.title,
            started_on: self.started_on,
            ended_on: self.ended_on,
            summary: self.summary,
            chronicle_note: self.chronicle_note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry(ended_on: Option<NaiveDate>) -> WorkEntryEntity {
        WorkEntryEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: "Initech".to_string(),
            title: "Staff Engineer".to_string(),
            started_on: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            ended_on,
            summary: None,
            chronicle_note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_current() {
        assert!(create_test_entry(None).is_current());
        assert!(!create_test_entry(NaiveDate::from_ymd_opt(2023, 6, 30)).is_current());
    }

    #[test]
    fn test_into_response() {
        let entry = create_test_entry(None);
        let id = entry.id;
        let response = entry.into_response();
        assert_eq!(response.id, id);
        assert_eq!(response.company, "Initech");
        assert!(response.ended_on.is_none());
    }
}
