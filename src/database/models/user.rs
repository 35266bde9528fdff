use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Authorization roles. Stored as TEXT; compared against these constants.
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_SPONSOR: &str = "SPONSOR";
pub const ROLE_USER: &str = "USER";

/// User row as returned to clients; never includes the password hash.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub skill_rating: Option<f64>,
    pub bio: Option<String>,
    pub points_balance: i32,
    pub created_at: DateTime<Utc>,
}

/// Internal row for credential checks only.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
    pub locked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SecurityLog {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub target_user_id: Option<Uuid>,
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
