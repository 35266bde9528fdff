use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub registration_open: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRegistration {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
