mod common;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// These run against a spawned server backed by a real database. Without
// DATABASE_URL there is nothing to talk to, so each test no-ops.
fn database_configured() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

#[tokio::test]
async fn created_goal_starts_active_at_zero_progress() -> Result<()> {
    if !database_configured() {
        eprintln!("DATABASE_URL not set; skipping");
        return Ok(());
    }

    let server = common::TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    let client = reqwest::Client::new();
    let (user_id, token) = common::signup(&client, &server.base_url, "Goalsetter").await?;

    let res = client
        .post(format!("{}/api/training/goals", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "goalText": "Hold serve under pressure" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let goal = res.json::<Value>().await?;
    assert_eq!(goal["goalText"], "Hold serve under pressure");
    assert_eq!(goal["status"], "ACTIVE");
    assert_eq!(goal["progressPercentage"], 0);
    assert_eq!(goal["userId"].as_str(), Some(user_id.as_str()));

    // The created record shows up in the caller's own listing
    let res = client
        .get(format!("{}/api/training/goals", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let goals = res.json::<Value>().await?;
    let goals = goals.as_array().expect("listing should be an array");
    assert!(goals.iter().any(|g| g["id"] == goal["id"]));

    Ok(())
}

#[tokio::test]
async fn goal_listings_only_return_the_callers_records() -> Result<()> {
    if !database_configured() {
        eprintln!("DATABASE_URL not set; skipping");
        return Ok(());
    }

    let server = common::TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    let client = reqwest::Client::new();

    let (ana_id, ana_token) = common::signup(&client, &server.base_url, "Ana").await?;
    let (_, bo_token) = common::signup(&client, &server.base_url, "Bo").await?;

    let create = |token: String, text: &'static str| {
        let client = client.clone();
        let url = format!("{}/api/training/goals", server.base_url);
        async move {
            let res = client
                .post(url)
                .bearer_auth(token)
                .json(&json!({ "goalText": text }))
                .send()
                .await?;
            assert_eq!(res.status(), StatusCode::CREATED);
            Ok::<Value, anyhow::Error>(res.json::<Value>().await?)
        }
    };

    let ana_goal = create(ana_token.clone(), "Sharpen third-shot drops").await?;
    let bo_goal = create(bo_token.clone(), "Improve kitchen footwork").await?;

    let res = client
        .get(format!("{}/api/training/goals", server.base_url))
        .bearer_auth(&ana_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed = res.json::<Value>().await?;
    let listed = listed.as_array().expect("listing should be an array");

    // Every returned record belongs to the caller; the other account's
    // record never appears
    assert!(listed.iter().all(|g| g["userId"].as_str() == Some(ana_id.as_str())));
    assert!(listed.iter().any(|g| g["id"] == ana_goal["id"]));
    assert!(listed.iter().all(|g| g["id"] != bo_goal["id"]));

    Ok(())
}
