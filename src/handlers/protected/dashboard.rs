use axum::{extract::Extension, response::Json};
use serde::Serialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::rewards::RewardUnlock;
use crate::database::models::tournament::TournamentRegistration;
use crate::database::models::training::TrainingGoal;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub goals: Vec<TrainingGoal>,
    pub registrations: Vec<TournamentRegistration>,
    pub recent_unlocks: Vec<RewardUnlock>,
}

/// GET /api/dashboard - the signed-in player's landing data.
///
/// Three mutually independent reads issued concurrently; no ordering
/// requirement between them.
pub async fn get_dashboard(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let goals = sqlx::query_as::<_, TrainingGoal>(
        "SELECT * FROM training_goals WHERE user_id = $1 ORDER BY created_at DESC, id LIMIT 10",
    )
    .bind(user.user_id)
    .fetch_all(&pool);

    let registrations = sqlx::query_as::<_, TournamentRegistration>(
        "SELECT * FROM tournament_registrations WHERE user_id = $1 ORDER BY created_at DESC, id LIMIT 10",
    )
    .bind(user.user_id)
    .fetch_all(&pool);

    let unlocks = sqlx::query_as::<_, RewardUnlock>(
        "SELECT * FROM reward_unlocks WHERE user_id = $1 ORDER BY created_at DESC, id LIMIT 5",
    )
    .bind(user.user_id)
    .fetch_all(&pool);

    let (goals, registrations, recent_unlocks) = tokio::try_join!(goals, registrations, unlocks)?;

    Ok(Json(DashboardResponse {
        goals,
        registrations,
        recent_unlocks,
    }))
}
