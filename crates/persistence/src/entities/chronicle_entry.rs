//! Chronicle entry entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{ChronicleEntryResponse, ChronicleKind};

/// Database row mapping for the chronicle_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct ChronicleEntryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub happened_on: NaiveDate,
    pub place_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChronicleEntryEntity {
    /// Parsed entry kind; unknown strings fall back to `Life`.
    pub fn kind(&self) -> ChronicleKind {
        self.kind.parse().unwrap_or(ChronicleKind::Life)
    }

    pub fn into_response(self) -> ChronicleEntryResponse {
        let kind = self.kind();
        ChronicleEntryResponse {
            id: self.id,
            kind,
            title: self.title,
            description: self.description,
            happened_on: self.happened_on,
            place_id: self.place_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        let entry = ChronicleEntryEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: "work".to_string(),
            title: "Joined Initech".to_string(),
            description: None,
            happened_on: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            place_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(entry.kind(), ChronicleKind::Work);

        let response = entry.into_response();
        assert_eq!(response.kind, ChronicleKind::Work);
        assert_eq!(response.title, "Joined Initech");
    }
}
