use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Role gate for `/api/admin/*`. Runs after `jwt_auth_middleware`, so a
/// missing `AuthUser` extension means the layering is wrong rather than the
/// caller being anonymous.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    if !auth_user.is_admin() {
        tracing::warn!(
            "User {} ({}) attempted admin route with role {}",
            auth_user.user_id,
            auth_user.email,
            auth_user.role
        );
        return Err(ApiError::forbidden("Forbidden"));
    }

    Ok(next.run(request).await)
}
