mod common;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn server_boots_and_gates_admin_routes() -> Result<()> {
    let server = common::TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;

    let client = reqwest::Client::new();

    // Health is public and always answers JSON
    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );
    let _body = res.json::<serde_json::Value>().await?;

    // Admin surface over real HTTP: anonymous request never reaches the data layer
    let res = client
        .get(format!("{}/api/admin/videos", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, serde_json::json!({ "error": "Unauthorized" }));

    Ok(())
}
