#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use champion_api::auth::{generate_jwt, Claims};

/// Fresh application router for in-process request tests.
pub fn app() -> Router {
    champion_api::server::app()
}

/// Mint a token the way the login handler would, signed with the same
/// configured secret the middleware validates against.
pub fn token_for(role: &str) -> String {
    let claims = Claims::new(Uuid::new_v4(), format!("{}@test.local", role.to_lowercase()), role.to_string());
    generate_jwt(claims).expect("failed to sign test JWT")
}

pub async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    Ok(app.oneshot(request).await?)
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn assert_error(
    response: Response<Body>,
    expected_status: StatusCode,
    expected_message: &str,
) -> Result<()> {
    assert_eq!(response.status(), expected_status);
    let body = body_json(response).await?;
    assert_eq!(body, serde_json::json!({ "error": expected_message }));
    Ok(())
}

/// Spawned real-server harness for tests that need the wire (and, with
/// DATABASE_URL set, the database). The child inherits the environment.
pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_champion-api"));
        cmd.env("CHAMPION_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;
        Ok(Self { base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on any non-404 response; 503 just means no database
                if resp.status() == reqwest::StatusCode::OK
                    || resp.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

/// Register a fresh account over the wire and log it in.
/// Returns the new user's id and a session token.
pub async fn signup(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<(String, String)> {
    let email = format!("{}-{}@test.local", name.to_lowercase(), Uuid::new_v4());
    let password = "pw-123456";

    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&serde_json::json!({ "email": email, "password": password, "name": name }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == reqwest::StatusCode::CREATED,
        "register failed with {}",
        res.status()
    );

    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == reqwest::StatusCode::OK,
        "login failed with {}",
        res.status()
    );

    let body = res.json::<Value>().await?;
    let token = body["token"].as_str().context("login response missing token")?;
    let user_id = body["user"]["id"]
        .as_str()
        .context("login response missing user id")?;
    Ok((user_id.to_string(), token.to_string()))
}
