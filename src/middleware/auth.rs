use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config;
use crate::database::models::user::ROLE_ADMIN;
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Session gate: validates the bearer token and injects `AuthUser` into the
/// request. Any failure short-circuits with 401 `{"error":"Unauthorized"}`
/// before a handler (and therefore the data store) is ever reached.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_jwt_from_headers(&headers) {
        Ok(token) => token,
        Err(msg) => {
            tracing::debug!("Rejected request without valid bearer token: {}", msg);
            return Err(ApiError::unauthorized("Unauthorized"));
        }
    };

    let claims = match validate_jwt(&token) {
        Ok(claims) => claims,
        Err(msg) => {
            tracing::debug!("Rejected invalid JWT: {}", msg);
            return Err(ApiError::unauthorized("Unauthorized"));
        }
    };

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Pull the bearer token out of the Authorization header.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or("no Authorization header")?
        .to_str()
        .map_err(|_| "Authorization header is not valid UTF-8".to_string())?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization scheme is not Bearer")?
        .trim();
    if token.is_empty() {
        return Err("empty bearer token".into());
    }
    Ok(token.to_string())
}

/// Decode a token and verify its signature and expiry against the
/// configured secret.
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err("JWT secret is not configured".into());
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("token rejected: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn accepts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok123"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "tok123");
    }

    #[test]
    fn roundtrips_generated_token() {
        let claims = Claims::new(Uuid::new_v4(), "p@q.r".into(), "USER".into());
        let user_id = claims.sub;
        let token = crate::auth::generate_jwt(claims).unwrap();
        let decoded = validate_jwt(&token).unwrap();
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.role, "USER");
    }
}
