use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Goal lifecycle states. Stored as TEXT.
pub const GOAL_STATUS_ACTIVE: &str = "ACTIVE";
pub const GOAL_STATUS_COMPLETED: &str = "COMPLETED";
pub const GOAL_STATUS_ABANDONED: &str = "ABANDONED";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrainingVideo {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrainingGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_text: String,
    pub status: String,
    pub progress_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub weeks: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEnrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub program_id: Uuid,
    pub created_at: DateTime<Utc>,
}
