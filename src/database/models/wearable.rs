use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WearableDevice {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vendor: String,
    pub external_id: String,
    pub created_at: DateTime<Utc>,
}
