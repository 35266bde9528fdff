use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Application review states. Stored as TEXT.
pub const APPLICATION_STATUS_PENDING: &str = "PENDING";
pub const APPLICATION_STATUS_APPROVED: &str = "APPROVED";
pub const APPLICATION_STATUS_REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SponsorApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub pitch: String,
    pub status: String,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: Uuid,
    pub sponsor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
