use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Initial state for a freshly allocated upload. Stored as TEXT; the
/// analysis pipeline advances it out of band.
pub const VIDEO_STATUS_PENDING_UPLOAD: &str = "PENDING_UPLOAD";

/// A match/drill recording uploaded by a player for analysis. The file
/// itself lives in object storage under `storage_key`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVideo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub storage_key: String,
    pub upload_url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
