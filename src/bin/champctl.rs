//! Maintenance and debug CLI for the Mindful Champion backend.
//!
//! These commands run outside the request path, talking to the database
//! directly. Developer tooling only: no idempotency guarantees beyond what a
//! single SQL statement gives.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sqlx::Row;

use champion_api::auth::hash_password;
use champion_api::config;
use champion_api::database::manager::DatabaseManager;
use champion_api::database::models::user::SecurityLog;

#[derive(Parser)]
#[command(name = "champctl", about = "Mindful Champion maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ping the database
    ProbeDb,
    /// Report which vendor credentials are configured
    ProbeVendors,
    /// Print a user's record by email
    CheckUser {
        #[arg(long)]
        email: String,
    },
    /// Set a user's password
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear a user's account lock
    UnlockUser {
        #[arg(long)]
        email: String,
    },
    /// Print recent security-log entries, newest first
    SecurityLog {
        #[arg(long, default_value_t = 20)]
        take: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ProbeDb => probe_db().await,
        Command::ProbeVendors => probe_vendors(),
        Command::CheckUser { email } => check_user(&email).await,
        Command::ResetPassword { email, password } => reset_password(&email, &password).await,
        Command::UnlockUser { email } => unlock_user(&email).await,
        Command::SecurityLog { take } => security_log(take).await,
    }
}

async fn probe_db() -> Result<()> {
    DatabaseManager::health_check()
        .await
        .context("database ping failed")?;
    println!("database: ok");
    Ok(())
}

fn probe_vendors() -> Result<()> {
    let config = config::config();

    let state = |present: bool| if present { "configured" } else { "missing" };
    println!("storage bucket:  {}", state(config.storage.bucket.is_some()));
    println!("storage region:  {}", state(config.storage.region.is_some()));
    println!("email api key:   {}", state(config.email.api_key.is_some()));
    println!("email from:      {}", state(config.email.from_address.is_some()));
    println!("payment secret:  {}", state(config.payments.secret_key.is_some()));
    Ok(())
}

async fn check_user(email: &str) -> Result<()> {
    let pool = DatabaseManager::pool().await?;

    let row = sqlx::query(
        r#"
        SELECT id, email, name, role, points_balance, locked_at, created_at
        FROM users WHERE email = $1
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_optional(&pool)
    .await?;

    let Some(row) = row else {
        bail!("no user with email {}", email);
    };

    let id: uuid::Uuid = row.get("id");
    let name: String = row.get("name");
    let role: String = row.get("role");
    let points: i32 = row.get("points_balance");
    let locked_at: Option<chrono::DateTime<chrono::Utc>> = row.get("locked_at");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    println!("id:      {}", id);
    println!("name:    {}", name);
    println!("role:    {}", role);
    println!("points:  {}", points);
    println!("locked:  {}", locked_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "no".into()));
    println!("created: {}", created_at.to_rfc3339());
    Ok(())
}

async fn reset_password(email: &str, password: &str) -> Result<()> {
    if password.len() < 8 {
        bail!("password must be at least 8 characters");
    }

    let pool = DatabaseManager::pool().await?;
    let hash = hash_password(password).context("failed to hash password")?;

    let result = sqlx::query(
        "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE email = $1",
    )
    .bind(email.to_lowercase())
    .bind(&hash)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        bail!("no user with email {}", email);
    }
    println!("password updated for {}", email);
    Ok(())
}

async fn unlock_user(email: &str) -> Result<()> {
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query(
        "UPDATE users SET locked_at = NULL, updated_at = NOW() WHERE email = $1",
    )
    .bind(email.to_lowercase())
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        bail!("no user with email {}", email);
    }
    println!("account unlocked for {}", email);
    Ok(())
}

async fn security_log(take: i64) -> Result<()> {
    let pool = DatabaseManager::pool().await?;
    let take = take.clamp(1, 500);

    let entries: Vec<SecurityLog> = sqlx::query_as(
        "SELECT * FROM security_logs ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take)
    .fetch_all(&pool)
    .await?;

    if entries.is_empty() {
        println!("security log is empty");
        return Ok(());
    }

    for entry in entries {
        let target = entry
            .target_user_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{}  {:<24} actor={} target={} {}",
            entry.created_at.to_rfc3339(),
            entry.action,
            entry.actor_id,
            target,
            entry.detail
        );
    }
    Ok(())
}
