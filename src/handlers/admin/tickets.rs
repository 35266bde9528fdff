use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::support::{
    SupportTicket, TICKET_STATUS_AWAITING_SUPPORT, TICKET_STATUS_AWAITING_USER,
    TICKET_STATUS_CLOSED, TICKET_STATUS_OPEN,
};
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;
use crate::services::audit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
}

/// GET /api/admin/tickets - all tickets, most recent first
pub async fn list_tickets(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let tickets: Vec<SupportTicket> = sqlx::query_as(
        "SELECT * FROM support_tickets ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(tickets))
}

/// PATCH /api/admin/tickets/:id - move a ticket through its lifecycle
pub async fn update_ticket(
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTicketRequest>,
) -> Result<Json<SupportTicket>, ApiError> {
    let status = match body.status.as_deref() {
        Some(s) => s,
        None => return Err(ApiError::bad_request("Status required")),
    };
    if ![
        TICKET_STATUS_OPEN,
        TICKET_STATUS_AWAITING_SUPPORT,
        TICKET_STATUS_AWAITING_USER,
        TICKET_STATUS_CLOSED,
    ]
    .contains(&status)
    {
        return Err(ApiError::bad_request("Invalid ticket status"));
    }

    let pool = DatabaseManager::pool().await?;

    let ticket: Option<SupportTicket> = sqlx::query_as(
        "UPDATE support_tickets SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(&pool)
    .await?;

    let ticket = ticket.ok_or_else(|| ApiError::not_found("Ticket not found"))?;

    audit::log_security_event(
        &pool,
        admin.user_id,
        "ticket.status_change",
        Some(ticket.user_id),
        serde_json::json!({ "ticketId": ticket.id, "status": status }),
    )
    .await;

    Ok(Json(ticket))
}
