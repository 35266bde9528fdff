use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::sponsor::{
    SponsorApplication, APPLICATION_STATUS_APPROVED, APPLICATION_STATUS_PENDING,
    APPLICATION_STATUS_REJECTED,
};
use crate::database::models::user::ROLE_SPONSOR;
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;
use crate::services::audit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub approve: Option<bool>,
    pub notes: Option<String>,
}

/// GET /api/admin/sponsor-applications - pending first, then the rest
pub async fn list_applications(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<SponsorApplication>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let applications: Vec<SponsorApplication> = sqlx::query_as(
        r#"
        SELECT * FROM sponsor_applications
        ORDER BY (status = $1) DESC, created_at DESC, id
        LIMIT $2
        "#,
    )
    .bind(APPLICATION_STATUS_PENDING)
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(applications))
}

/// POST /api/admin/sponsor-applications/:id/review
///
/// Approval flips the applicant's role to SPONSOR in the same transaction as
/// the status change.
pub async fn review_application(
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<SponsorApplication>, ApiError> {
    let approve = body
        .approve
        .ok_or_else(|| ApiError::bad_request("Approve flag required"))?;

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let application: Option<SponsorApplication> =
        sqlx::query_as("SELECT * FROM sponsor_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let application = application.ok_or_else(|| ApiError::not_found("Application not found"))?;

    if application.status != APPLICATION_STATUS_PENDING {
        return Err(ApiError::conflict("Application has already been reviewed"));
    }

    let new_status = if approve {
        APPLICATION_STATUS_APPROVED
    } else {
        APPLICATION_STATUS_REJECTED
    };

    let reviewed: SponsorApplication = sqlx::query_as(
        r#"
        UPDATE sponsor_applications
        SET status = $2, review_notes = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(new_status)
    .bind(body.notes.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    if approve {
        sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1")
            .bind(application.user_id)
            .bind(ROLE_SPONSOR)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    audit::log_security_event(
        &pool,
        admin.user_id,
        "sponsor_application.review",
        Some(application.user_id),
        json!({ "applicationId": id, "approved": approve }),
    )
    .await;

    Ok(Json(reviewed))
}
