mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

// Required-field checks run before any data access, so omitting a field
// yields 400 and provably mutates nothing.

#[tokio::test]
async fn celebration_shown_without_unlock_id_is_rejected() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/rewards/celebration-shown",
        Some(&token),
        Some(json!({})),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Unlock ID required").await
}

#[tokio::test]
async fn redeem_without_reward_id_is_rejected() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/rewards/redeem",
        Some(&token),
        Some(json!({})),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Reward ID required").await
}

#[tokio::test]
async fn goal_without_text_is_rejected() -> Result<()> {
    let token = common::token_for("USER");
    for body in [json!({}), json!({ "goalText": "" }), json!({ "goalText": "   " })] {
        let res = common::send(
            common::app(),
            Method::POST,
            "/api/training/goals",
            Some(&token),
            Some(body),
        )
        .await?;
        common::assert_error(res, StatusCode::BAD_REQUEST, "Goal text required").await?;
    }
    Ok(())
}

#[tokio::test]
async fn goal_progress_outside_range_is_rejected() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::PATCH,
        "/api/training/goals/5b2f9f3e-1111-4222-8333-444455556666",
        Some(&token),
        Some(json!({ "progressPercentage": 150 })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Progress must be between 0 and 100").await
}

#[tokio::test]
async fn goal_with_unknown_status_is_rejected() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::PATCH,
        "/api/training/goals/5b2f9f3e-1111-4222-8333-444455556666",
        Some(&token),
        Some(json!({ "status": "DONE" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Invalid goal status").await
}

#[tokio::test]
async fn register_requires_each_field() -> Result<()> {
    let cases = [
        (json!({ "password": "pw123456", "name": "Sam" }), "Email required"),
        (json!({ "email": "sam@example.com", "name": "Sam" }), "Password required"),
        (json!({ "email": "sam@example.com", "password": "pw123456" }), "Name required"),
    ];
    for (body, message) in cases {
        let res = common::send(common::app(), Method::POST, "/auth/register", None, Some(body)).await?;
        common::assert_error(res, StatusCode::BAD_REQUEST, message).await?;
    }
    Ok(())
}

#[tokio::test]
async fn support_ticket_requires_subject_and_message() -> Result<()> {
    let token = common::token_for("USER");

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/support/tickets",
        Some(&token),
        Some(json!({ "message": "My serve stats vanished" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Subject required").await?;

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/support/tickets",
        Some(&token),
        Some(json!({ "subject": "Missing stats" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Message required").await
}

#[tokio::test]
async fn wearable_registration_requires_vendor_and_device_id() -> Result<()> {
    let token = common::token_for("USER");

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/wearables/devices",
        Some(&token),
        Some(json!({ "externalId": "garmin-123" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Vendor required").await?;

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/wearables/devices",
        Some(&token),
        Some(json!({ "vendor": "garmin" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Device ID required").await
}

#[tokio::test]
async fn analysis_video_requires_title() -> Result<()> {
    let token = common::token_for("USER");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/videos",
        Some(&token),
        Some(json!({})),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Title required").await
}

#[tokio::test]
async fn sponsor_application_requires_company_and_pitch() -> Result<()> {
    let token = common::token_for("USER");

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/sponsor/application",
        Some(&token),
        Some(json!({ "pitch": "We make paddles" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Company name required").await?;

    let res = common::send(
        common::app(),
        Method::POST,
        "/api/sponsor/application",
        Some(&token),
        Some(json!({ "companyName": "Paddle Co" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Pitch required").await
}

#[tokio::test]
async fn admin_ticket_update_requires_valid_status() -> Result<()> {
    let token = common::token_for("ADMIN");

    let res = common::send(
        common::app(),
        Method::PATCH,
        "/api/admin/tickets/5b2f9f3e-1111-4222-8333-444455556666",
        Some(&token),
        Some(json!({})),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Status required").await?;

    let res = common::send(
        common::app(),
        Method::PATCH,
        "/api/admin/tickets/5b2f9f3e-1111-4222-8333-444455556666",
        Some(&token),
        Some(json!({ "status": "SOLVED" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Invalid ticket status").await
}

#[tokio::test]
async fn admin_review_requires_approve_flag() -> Result<()> {
    let token = common::token_for("ADMIN");
    let res = common::send(
        common::app(),
        Method::POST,
        "/api/admin/sponsor-applications/5b2f9f3e-1111-4222-8333-444455556666/review",
        Some(&token),
        Some(json!({ "notes": "looks good" })),
    )
    .await?;
    common::assert_error(res, StatusCode::BAD_REQUEST, "Approve flag required").await
}
