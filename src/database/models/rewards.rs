use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An achievement unlock granted to a user. The unlock itself is produced
/// outside this service; here it is read, listed, and its celebration flag
/// flipped once the client has shown the animation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RewardUnlock {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_key: String,
    pub points_awarded: i32,
    pub celebration_shown: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cost_points: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RewardRedemption {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reward_id: Uuid,
    pub cost_points: i32,
    pub created_at: DateTime<Utc>,
}
