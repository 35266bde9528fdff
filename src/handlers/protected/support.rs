use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::support::{
    SupportTicket, TicketResponse, TICKET_STATUS_AWAITING_SUPPORT, TICKET_STATUS_CLOSED,
    TICKET_STATUS_OPEN,
};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub ticket: SupportTicket,
    pub responses: Vec<TicketResponse>,
}

/// GET /api/support/tickets - the caller's tickets
pub async fn list_tickets(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let tickets: Vec<SupportTicket> = sqlx::query_as(
        "SELECT * FROM support_tickets WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(tickets))
}

/// POST /api/support/tickets - open a ticket with an initial message.
///
/// Ticket insert and first response insert share a transaction.
pub async fn create_ticket(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketDetail>), ApiError> {
    let subject = match body.subject.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ApiError::bad_request("Subject required")),
    };
    let message = match body.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => return Err(ApiError::bad_request("Message required")),
    };

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let ticket: SupportTicket = sqlx::query_as(
        r#"
        INSERT INTO support_tickets (id, user_id, subject, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(subject)
    .bind(TICKET_STATUS_OPEN)
    .fetch_one(&mut *tx)
    .await?;

    let response: TicketResponse = sqlx::query_as(
        r#"
        INSERT INTO ticket_responses (id, ticket_id, author_id, message, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ticket.id)
    .bind(user.user_id)
    .bind(message)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(TicketDetail {
            ticket,
            responses: vec![response],
        }),
    ))
}

/// GET /api/support/tickets/:id - own ticket with its thread
pub async fn get_ticket(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketDetail>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let ticket: Option<SupportTicket> =
        sqlx::query_as("SELECT * FROM support_tickets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.user_id)
            .fetch_optional(&pool)
            .await?;
    let ticket = ticket.ok_or_else(|| ApiError::not_found("Ticket not found"))?;

    let responses: Vec<TicketResponse> = sqlx::query_as(
        "SELECT * FROM ticket_responses WHERE ticket_id = $1 ORDER BY created_at ASC, id",
    )
    .bind(ticket.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(TicketDetail { ticket, responses }))
}

/// POST /api/support/tickets/:id/responses - reply on an own ticket.
///
/// Response insert and ticket status update run in one transaction so a
/// partial failure cannot leave the thread and the status out of sync.
pub async fn add_response(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<TicketResponseRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let message = match body.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => return Err(ApiError::bad_request("Message required")),
    };

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let ticket: Option<SupportTicket> =
        sqlx::query_as("SELECT * FROM support_tickets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let ticket = ticket.ok_or_else(|| ApiError::not_found("Ticket not found"))?;

    if ticket.status == TICKET_STATUS_CLOSED {
        return Err(ApiError::conflict("Ticket is closed"));
    }

    let response: TicketResponse = sqlx::query_as(
        r#"
        INSERT INTO ticket_responses (id, ticket_id, author_id, message, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ticket.id)
    .bind(user.user_id)
    .bind(message)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE support_tickets SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(ticket.id)
        .bind(TICKET_STATUS_AWAITING_SUPPORT)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(response)))
}
