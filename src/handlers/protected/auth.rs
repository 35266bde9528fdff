use axum::{extract::Extension, response::Json};
use serde::Serialize;

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiResponse {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
}

/// GET /api/auth/whoami - echo the session identity
pub async fn whoami(Extension(user): Extension<AuthUser>) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        user_id: user.user_id,
        email: user.email,
        role: user.role,
    })
}

/// POST /api/auth/refresh - mint a fresh token from a still-valid session
pub async fn refresh(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = generate_jwt(Claims::new(user.user_id, user.email, user.role))?;
    Ok(Json(RefreshResponse { token }))
}
