//! Chronicle place entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ChroniclePlaceResponse;

/// Database row mapping for the chronicle_places table.
#[derive(Debug, Clone, FromRow)]
pub struct ChroniclePlaceEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub locality: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChroniclePlaceEntity {
    pub fn into_response(self) -> ChroniclePlaceResponse {
        ChroniclePlaceResponse {
            id: self.id,
            name: self.name,
            locality: self.locality,
            note: self.note,
            created_at: self.created_at,
        }
    }
}
