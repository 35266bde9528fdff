use axum::{extract::Extension, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::video::{AnalysisVideo, VIDEO_STATUS_PENDING_UPLOAD};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::storage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<String>,
}

/// POST /api/videos - allocate storage for a new analysis video.
///
/// 503 when object storage is unconfigured; this is the first-use failure
/// point for the storage credentials.
pub async fn create_video(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<AnalysisVideo>), ApiError> {
    let title = match body.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::bad_request("Title required")),
    };

    let object = storage::allocate_video_object(user.user_id)?;

    let pool = DatabaseManager::pool().await?;

    let video: AnalysisVideo = sqlx::query_as(
        r#"
        INSERT INTO analysis_videos (id, user_id, title, storage_key, upload_url, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(title)
    .bind(&object.storage_key)
    .bind(&object.upload_url)
    .bind(VIDEO_STATUS_PENDING_UPLOAD)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /api/videos - the caller's analysis videos
pub async fn list_videos(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<AnalysisVideo>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let videos: Vec<AnalysisVideo> = sqlx::query_as(
        "SELECT * FROM analysis_videos WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(videos))
}
