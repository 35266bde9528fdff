use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;

/// Record a security-relevant mutation (account lock/unlock, admin edits,
/// sponsor approval) to the security log.
///
/// Best-effort: a failed audit insert is logged and swallowed so the primary
/// mutation's response is not affected.
pub async fn log_security_event(
    pool: &PgPool,
    actor_id: Uuid,
    action: &str,
    target_user_id: Option<Uuid>,
    detail: Value,
) {
    if !config::config().security.enable_audit_logging {
        return;
    }

    let result = sqlx::query(
        r#"
        INSERT INTO security_logs (id, actor_id, action, target_user_id, detail, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(actor_id)
    .bind(action)
    .bind(target_user_id)
    .bind(detail)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!("Failed to write security log for action '{}': {}", action, e);
    }
}
