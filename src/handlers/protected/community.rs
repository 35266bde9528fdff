use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::community::CommunityPost;
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: Option<String>,
}

const MAX_POST_LENGTH: usize = 2000;

/// GET /api/community/posts - recent posts, everyone can read
pub async fn list_posts(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<CommunityPost>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let posts: Vec<CommunityPost> = sqlx::query_as(
        "SELECT * FROM community_posts ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(posts))
}

/// POST /api/community/posts
pub async fn create_post(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CommunityPost>), ApiError> {
    let content = match body.content.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Err(ApiError::bad_request("Post content required")),
    };
    if content.len() > MAX_POST_LENGTH {
        return Err(ApiError::bad_request("Post content too long"));
    }

    let pool = DatabaseManager::pool().await?;

    // Author name denormalized onto the post at write time
    let author: Option<(String,)> = sqlx::query_as("SELECT name FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&pool)
        .await?;
    let (author_name,) = author.ok_or_else(|| ApiError::not_found("User not found"))?;

    let post: CommunityPost = sqlx::query_as(
        r#"
        INSERT INTO community_posts (id, user_id, author_name, content, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(author_name)
    .bind(content)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /api/community/posts/:id - own post, or any post for admins
pub async fn delete_post(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let result = if user.is_admin() {
        sqlx::query("DELETE FROM community_posts WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await?
    } else {
        sqlx::query("DELETE FROM community_posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.user_id)
            .execute(&pool)
            .await?
    };

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Post not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
