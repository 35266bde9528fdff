use axum::{extract::Query, response::Json};

use crate::database::manager::DatabaseManager;
use crate::database::models::sponsor::MarketplaceItem;
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};

/// GET /api/marketplace/items - active sponsor marketplace listings
pub async fn list_items(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<MarketplaceItem>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let items: Vec<MarketplaceItem> = sqlx::query_as(
        "SELECT * FROM marketplace_items WHERE active = TRUE ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(items))
}
