use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::training::TrainingVideo;
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;
use crate::services::audit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
}

/// GET /api/admin/videos - all training videos including unpublished
pub async fn list_videos(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<TrainingVideo>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let videos: Vec<TrainingVideo> = sqlx::query_as(
        "SELECT * FROM training_videos ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(videos))
}

/// POST /api/admin/videos - publish a training video
pub async fn create_video(
    Extension(admin): Extension<AuthUser>,
    Json(body): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<TrainingVideo>), ApiError> {
    let title = match body.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::bad_request("Title required")),
    };
    let url = match body.url.as_deref().map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => return Err(ApiError::bad_request("URL required")),
    };

    let pool = DatabaseManager::pool().await?;

    let video: TrainingVideo = sqlx::query_as(
        r#"
        INSERT INTO training_videos (id, title, url, category, published, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(url)
    .bind(body.category.as_deref().map(str::trim))
    .bind(body.published.unwrap_or(false))
    .fetch_one(&pool)
    .await?;

    audit::log_security_event(
        &pool,
        admin.user_id,
        "training_video.create",
        None,
        serde_json::json!({ "videoId": video.id }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(video)))
}
