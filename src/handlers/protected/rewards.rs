use axum::{extract::Extension, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::rewards::{Reward, RewardRedemption, RewardUnlock};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrationShownRequest {
    pub unlock_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub reward_id: Option<Uuid>,
}

/// GET /api/rewards/unlocks - the caller's achievement unlocks
pub async fn list_unlocks(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<RewardUnlock>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let unlocks: Vec<RewardUnlock> = sqlx::query_as(
        "SELECT * FROM reward_unlocks WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(unlocks))
}

/// POST /api/rewards/celebration-shown - mark an unlock's celebration as seen
pub async fn celebration_shown(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CelebrationShownRequest>,
) -> Result<Json<RewardUnlock>, ApiError> {
    let unlock_id = body
        .unlock_id
        .ok_or_else(|| ApiError::bad_request("Unlock ID required"))?;

    let pool = DatabaseManager::pool().await?;

    let unlock: Option<RewardUnlock> = sqlx::query_as(
        r#"
        UPDATE reward_unlocks
        SET celebration_shown = TRUE
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(unlock_id)
    .bind(user.user_id)
    .fetch_optional(&pool)
    .await?;

    unlock
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Unlock not found"))
}

/// GET /api/rewards - redeemable catalog
pub async fn list_rewards() -> Result<Json<Vec<Reward>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let rewards: Vec<Reward> = sqlx::query_as(
        "SELECT * FROM rewards WHERE active = TRUE ORDER BY cost_points ASC, id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(rewards))
}

/// POST /api/rewards/redeem - spend points on a reward.
///
/// Balance check, debit and redemption insert run in one transaction so a
/// partial failure cannot leave the balance and the redemption out of sync.
pub async fn redeem(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<RedeemRequest>,
) -> Result<(StatusCode, Json<RewardRedemption>), ApiError> {
    let reward_id = body
        .reward_id
        .ok_or_else(|| ApiError::bad_request("Reward ID required"))?;

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let reward: Option<Reward> =
        sqlx::query_as("SELECT * FROM rewards WHERE id = $1 AND active = TRUE")
            .bind(reward_id)
            .fetch_optional(&mut *tx)
            .await?;
    let reward = reward.ok_or_else(|| ApiError::not_found("Reward not found"))?;

    let balance: Option<(i32,)> =
        sqlx::query_as("SELECT points_balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (balance,) = balance.ok_or_else(|| ApiError::not_found("User not found"))?;

    if balance < reward.cost_points {
        return Err(ApiError::conflict("Insufficient points"));
    }

    sqlx::query("UPDATE users SET points_balance = points_balance - $2, updated_at = NOW() WHERE id = $1")
        .bind(user.user_id)
        .bind(reward.cost_points)
        .execute(&mut *tx)
        .await?;

    let redemption: RewardRedemption = sqlx::query_as(
        r#"
        INSERT INTO reward_redemptions (id, user_id, reward_id, cost_points, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(reward.id)
    .bind(reward.cost_points)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        "User {} redeemed reward {} for {} points",
        user.user_id,
        reward.id,
        reward.cost_points
    );
    Ok((StatusCode::CREATED, Json(redemption)))
}

/// GET /api/rewards/redemptions - the caller's redemption history
pub async fn list_redemptions(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<RewardRedemption>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let redemptions: Vec<RewardRedemption> = sqlx::query_as(
        "SELECT * FROM reward_redemptions WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(redemptions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celebration_request_tolerates_empty_body_object() {
        let req: CelebrationShownRequest = serde_json::from_str("{}").unwrap();
        assert!(req.unlock_id.is_none());
    }

    #[test]
    fn celebration_request_parses_camel_case_id() {
        let id = Uuid::new_v4();
        let req: CelebrationShownRequest =
            serde_json::from_value(serde_json::json!({ "unlockId": id })).unwrap();
        assert_eq!(req.unlock_id, Some(id));
    }
}
