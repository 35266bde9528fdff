use axum::{extract::Extension, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::sponsor::{SponsorApplication, APPLICATION_STATUS_PENDING};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorApplicationRequest {
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub pitch: Option<String>,
}

/// GET /api/sponsor/application - the caller's latest application
pub async fn get_application(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SponsorApplication>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let application: Option<SponsorApplication> = sqlx::query_as(
        "SELECT * FROM sponsor_applications WHERE user_id = $1 ORDER BY created_at DESC, id LIMIT 1",
    )
    .bind(user.user_id)
    .fetch_optional(&pool)
    .await?;

    application
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No sponsor application on file"))
}

/// POST /api/sponsor/application - apply to become a sponsor
pub async fn submit_application(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SponsorApplicationRequest>,
) -> Result<(StatusCode, Json<SponsorApplication>), ApiError> {
    let company_name = match body.company_name.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Err(ApiError::bad_request("Company name required")),
    };
    let pitch = match body.pitch.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ApiError::bad_request("Pitch required")),
    };

    let pool = DatabaseManager::pool().await?;

    let pending: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM sponsor_applications WHERE user_id = $1 AND status = $2",
    )
    .bind(user.user_id)
    .bind(APPLICATION_STATUS_PENDING)
    .fetch_optional(&pool)
    .await?;
    if pending.is_some() {
        return Err(ApiError::conflict("A sponsor application is already pending"));
    }

    let application: SponsorApplication = sqlx::query_as(
        r#"
        INSERT INTO sponsor_applications
            (id, user_id, company_name, website, pitch, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(company_name)
    .bind(body.website.as_deref().map(str::trim))
    .bind(pitch)
    .bind(APPLICATION_STATUS_PENDING)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}
