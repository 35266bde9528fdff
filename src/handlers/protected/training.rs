use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::training::{
    ProgramEnrollment, TrainingGoal, TrainingProgram, TrainingVideo, GOAL_STATUS_ABANDONED,
    GOAL_STATUS_ACTIVE, GOAL_STATUS_COMPLETED,
};
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub goal_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub progress_percentage: Option<i32>,
    pub status: Option<String>,
}

/// GET /api/training/videos - published training videos
pub async fn list_videos(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<TrainingVideo>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let videos: Vec<TrainingVideo> = sqlx::query_as(
        "SELECT * FROM training_videos WHERE published = TRUE ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(videos))
}

/// GET /api/training/videos/:id
pub async fn get_video(Path(id): Path<Uuid>) -> Result<Json<TrainingVideo>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let video: Option<TrainingVideo> =
        sqlx::query_as("SELECT * FROM training_videos WHERE id = $1 AND published = TRUE")
            .bind(id)
            .fetch_optional(&pool)
            .await?;

    video
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Video not found"))
}

/// POST /api/training/goals - create a goal; starts ACTIVE at 0% progress
pub async fn create_goal(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<TrainingGoal>), ApiError> {
    let goal_text = match body.goal_text.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::bad_request("Goal text required")),
    };

    let pool = DatabaseManager::pool().await?;

    let goal: TrainingGoal = sqlx::query_as(
        r#"
        INSERT INTO training_goals (id, user_id, goal_text, status, progress_percentage, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 0, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(goal_text)
    .bind(GOAL_STATUS_ACTIVE)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/training/goals - the caller's own goals
pub async fn list_goals(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<TrainingGoal>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let goals: Vec<TrainingGoal> = sqlx::query_as(
        "SELECT * FROM training_goals WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(goals))
}

/// PATCH /api/training/goals/:id - update own goal progress/status
pub async fn update_goal(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> Result<Json<TrainingGoal>, ApiError> {
    if let Some(pct) = body.progress_percentage {
        if !(0..=100).contains(&pct) {
            return Err(ApiError::bad_request("Progress must be between 0 and 100"));
        }
    }
    if let Some(status) = body.status.as_deref() {
        if ![GOAL_STATUS_ACTIVE, GOAL_STATUS_COMPLETED, GOAL_STATUS_ABANDONED].contains(&status) {
            return Err(ApiError::bad_request("Invalid goal status"));
        }
    }

    let pool = DatabaseManager::pool().await?;

    // Ownership filter lives in the WHERE clause: another user's goal id
    // simply does not match
    let goal: Option<TrainingGoal> = sqlx::query_as(
        r#"
        UPDATE training_goals
        SET progress_percentage = COALESCE($3, progress_percentage),
            status = COALESCE($4, status),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.user_id)
    .bind(body.progress_percentage)
    .bind(body.status)
    .fetch_optional(&pool)
    .await?;

    goal.map(Json)
        .ok_or_else(|| ApiError::not_found("Goal not found"))
}

/// GET /api/training/programs
pub async fn list_programs() -> Result<Json<Vec<TrainingProgram>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let programs: Vec<TrainingProgram> =
        sqlx::query_as("SELECT * FROM training_programs ORDER BY created_at DESC, id")
            .fetch_all(&pool)
            .await?;

    Ok(Json(programs))
}

/// POST /api/training/programs/:id/enroll
pub async fn enroll_program(
    Extension(user): Extension<AuthUser>,
    Path(program_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ProgramEnrollment>), ApiError> {
    let pool = DatabaseManager::pool().await?;

    let program: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM training_programs WHERE id = $1")
        .bind(program_id)
        .fetch_optional(&pool)
        .await?;
    if program.is_none() {
        return Err(ApiError::not_found("Program not found"));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM program_enrollments WHERE user_id = $1 AND program_id = $2",
    )
    .bind(user.user_id)
    .bind(program_id)
    .fetch_optional(&pool)
    .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Already enrolled in this program"));
    }

    let enrollment: ProgramEnrollment = sqlx::query_as(
        r#"
        INSERT INTO program_enrollments (id, user_id, program_id, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(program_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}
