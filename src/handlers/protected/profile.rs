use axum::{extract::Extension, response::Json};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::user::PublicUser;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub skill_rating: Option<f64>,
    pub bio: Option<String>,
}

/// GET /api/profile - the caller's own user record
pub async fn get_profile(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PublicUser>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let profile: Option<PublicUser> = sqlx::query_as(
        "SELECT id, email, name, role, skill_rating, bio, points_balance, created_at FROM users WHERE id = $1",
    )
    .bind(user.user_id)
    .fetch_optional(&pool)
    .await?;

    profile
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// PUT /api/profile - update own name, skill rating and bio
pub async fn update_profile(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(name) = body.name.as_deref() {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("Name cannot be empty"));
        }
    }
    if let Some(rating) = body.skill_rating {
        if !(1.0..=7.0).contains(&rating) {
            return Err(ApiError::bad_request("Skill rating must be between 1.0 and 7.0"));
        }
    }

    let pool = DatabaseManager::pool().await?;

    let updated: PublicUser = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            skill_rating = COALESCE($3, skill_rating),
            bio = COALESCE($4, bio),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, email, name, role, skill_rating, bio, points_balance, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(body.name.as_deref().map(str::trim))
    .bind(body.skill_rating)
    .bind(body.bio)
    .fetch_one(&pool)
    .await?;

    Ok(Json(updated))
}
