use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::user::{PublicUser, ROLE_ADMIN, ROLE_SPONSOR, ROLE_USER};
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;
use crate::services::audit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub points_balance: Option<i32>,
}

/// GET /api/admin/users
pub async fn list_users(Query(query): Query<TakeQuery>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let users: Vec<PublicUser> = sqlx::query_as(
        r#"
        SELECT id, email, name, role, skill_rating, bio, points_balance, created_at
        FROM users ORDER BY created_at DESC, id LIMIT $1
        "#,
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(users))
}

/// PATCH /api/admin/users/:id - admin edit of another user's record.
///
/// Writes a security-log entry describing which fields changed.
pub async fn update_user(
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminUpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(name) = body.name.as_deref() {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("Name cannot be empty"));
        }
    }
    if let Some(role) = body.role.as_deref() {
        if ![ROLE_ADMIN, ROLE_SPONSOR, ROLE_USER].contains(&role) {
            return Err(ApiError::bad_request("Invalid role"));
        }
    }
    if let Some(balance) = body.points_balance {
        if balance < 0 {
            return Err(ApiError::bad_request("Points balance cannot be negative"));
        }
    }

    let pool = DatabaseManager::pool().await?;

    let updated: Option<PublicUser> = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            role = COALESCE($3, role),
            points_balance = COALESCE($4, points_balance),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, email, name, role, skill_rating, bio, points_balance, created_at
        "#,
    )
    .bind(id)
    .bind(body.name.as_deref().map(str::trim))
    .bind(body.role.as_deref())
    .bind(body.points_balance)
    .fetch_optional(&pool)
    .await?;

    let updated = updated.ok_or_else(|| ApiError::not_found("User not found"))?;

    audit::log_security_event(
        &pool,
        admin.user_id,
        "user.admin_update",
        Some(id),
        json!({
            "nameChanged": body.name.is_some(),
            "roleChanged": body.role.is_some(),
            "pointsChanged": body.points_balance.is_some(),
        }),
    )
    .await;

    Ok(Json(updated))
}

/// POST /api/admin/users/:id/lock
pub async fn lock_user(
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    set_lock(admin, id, true).await
}

/// POST /api/admin/users/:id/unlock
pub async fn unlock_user(
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    set_lock(admin, id, false).await
}

async fn set_lock(admin: AuthUser, id: Uuid, locked: bool) -> Result<Json<PublicUser>, ApiError> {
    if admin.user_id == id && locked {
        return Err(ApiError::bad_request("Cannot lock your own account"));
    }

    let pool = DatabaseManager::pool().await?;

    let sql = if locked {
        r#"
        UPDATE users SET locked_at = NOW(), updated_at = NOW()
        WHERE id = $1
        RETURNING id, email, name, role, skill_rating, bio, points_balance, created_at
        "#
    } else {
        r#"
        UPDATE users SET locked_at = NULL, updated_at = NOW()
        WHERE id = $1
        RETURNING id, email, name, role, skill_rating, bio, points_balance, created_at
        "#
    };

    let user: Option<PublicUser> = sqlx::query_as(sql).bind(id).fetch_optional(&pool).await?;
    let user = user.ok_or_else(|| ApiError::not_found("User not found"))?;

    let action = if locked { "user.lock" } else { "user.unlock" };
    audit::log_security_event(&pool, admin.user_id, action, Some(id), json!({})).await;

    tracing::info!("Admin {} {} account {}", admin.user_id, action, id);
    Ok(Json(user))
}
