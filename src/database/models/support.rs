use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Ticket lifecycle states. Stored as TEXT.
pub const TICKET_STATUS_OPEN: &str = "OPEN";
pub const TICKET_STATUS_AWAITING_SUPPORT: &str = "AWAITING_SUPPORT";
pub const TICKET_STATUS_AWAITING_USER: &str = "AWAITING_USER";
pub const TICKET_STATUS_CLOSED: &str = "CLOSED";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub author_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
