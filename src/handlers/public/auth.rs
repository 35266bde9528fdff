use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::user::{PublicUser, UserCredentials, ROLE_USER};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /auth/register - create a USER-role account
pub async fn register(
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let email = match body.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e.to_lowercase(),
        _ => return Err(ApiError::bad_request("Email required")),
    };
    let password = match body.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ApiError::bad_request("Password required")),
    };
    let name = match body.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => return Err(ApiError::bad_request("Name required")),
    };

    let pool = DatabaseManager::pool().await?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("An account with this email already exists"));
    }

    let password_hash = hash_password(password)?;

    let user: PublicUser = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, role, password_hash, points_balance, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 0, NOW(), NOW())
        RETURNING id, email, name, role, skill_rating, bio, points_balance, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(name)
    .bind(ROLE_USER)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Registered new user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - verify credentials and issue a JWT
pub async fn login(Json(body): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    let email = match body.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e.to_lowercase(),
        _ => return Err(ApiError::bad_request("Email required")),
    };
    let password = match body.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ApiError::bad_request("Password required")),
    };

    let pool = DatabaseManager::pool().await?;

    let creds: Option<UserCredentials> = sqlx::query_as(
        "SELECT id, email, name, role, password_hash, locked_at FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&pool)
    .await?;

    // Same message for unknown email and wrong password
    let creds = creds.ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(password, &creds.password_hash)? {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    if creds.locked_at.is_some() {
        return Err(ApiError::forbidden("Account is locked"));
    }

    let token = generate_jwt(Claims::new(creds.id, creds.email.clone(), creds.role.clone()))?;

    let user: PublicUser = sqlx::query_as(
        "SELECT id, email, name, role, skill_rating, bio, points_balance, created_at FROM users WHERE id = $1",
    )
    .bind(creds.id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(LoginResponse { token, user }))
}

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Mindful Champion API",
        "version": version,
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/register, /auth/login (public - token acquisition)",
            "api": "/api/* (protected)",
            "admin": "/api/admin/* (protected, ADMIN role)",
        }
    }))
}

/// GET /health - liveness plus database ping
pub async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable",
                "databaseError": e.to_string()
            })),
        ),
    }
}
