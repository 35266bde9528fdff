mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

// Admin routes: anonymous callers are rejected by the session gate before the
// role check or any data access.
#[tokio::test]
async fn admin_videos_without_session_is_unauthorized() -> Result<()> {
    let res = common::send(common::app(), Method::GET, "/api/admin/videos", None, None).await?;
    common::assert_error(res, StatusCode::UNAUTHORIZED, "Unauthorized").await
}

#[tokio::test]
async fn admin_videos_with_user_role_is_forbidden() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::GET,
        "/api/admin/videos",
        Some(&token),
        None,
    )
    .await?;
    common::assert_error(res, StatusCode::FORBIDDEN, "Forbidden").await
}

#[tokio::test]
async fn admin_user_lock_with_sponsor_role_is_forbidden() -> Result<()> {
    let token = common::token_for("SPONSOR");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/admin/users/5b2f9f3e-1111-4222-8333-444455556666/lock",
        Some(&token),
        None,
    )
    .await?;
    common::assert_error(res, StatusCode::FORBIDDEN, "Forbidden").await
}

#[tokio::test]
async fn protected_routes_without_session_are_unauthorized() -> Result<()> {
    for path in [
        "/api/training/goals",
        "/api/rewards/redemptions",
        "/api/support/tickets",
        "/api/wearables/devices",
        "/api/dashboard",
    ] {
        let res = common::send(common::app(), Method::GET, path, None, None).await?;
        common::assert_error(res, StatusCode::UNAUTHORIZED, "Unauthorized").await?;
    }
    Ok(())
}

#[tokio::test]
async fn malformed_bearer_token_is_unauthorized() -> Result<()> {
    let res = common::send(
        common::app(),
        Method::GET,
        "/api/auth/whoami",
        Some("not-a-jwt"),
        None,
    )
    .await?;
    common::assert_error(res, StatusCode::UNAUTHORIZED, "Unauthorized").await
}

#[tokio::test]
async fn whoami_echoes_session_identity() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::GET,
        "/api/auth/whoami",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await?;
    assert_eq!(body["role"], json!("USER"));
    assert_eq!(body["email"], json!("user@test.local"));
    assert!(body["userId"].is_string());
    Ok(())
}

#[tokio::test]
async fn refresh_issues_a_new_token() -> Result<()> {
    let token = common::token_for("ADMIN");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/auth/refresh",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await?;
    assert!(body["token"].is_string());
    Ok(())
}
