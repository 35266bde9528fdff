use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::wearable::WearableDevice;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub vendor: Option<String>,
    pub external_id: Option<String>,
}

/// GET /api/wearables/devices - the caller's registered devices
pub async fn list_devices(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WearableDevice>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let devices: Vec<WearableDevice> = sqlx::query_as(
        "SELECT * FROM wearable_devices WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(devices))
}

/// POST /api/wearables/devices - register a device
pub async fn register_device(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<WearableDevice>), ApiError> {
    let vendor = match body.vendor.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(ApiError::bad_request("Vendor required")),
    };
    let external_id = match body.external_id.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e,
        _ => return Err(ApiError::bad_request("Device ID required")),
    };

    let pool = DatabaseManager::pool().await?;

    let existing: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM wearable_devices WHERE user_id = $1 AND vendor = $2 AND external_id = $3",
    )
    .bind(user.user_id)
    .bind(vendor)
    .bind(external_id)
    .fetch_optional(&pool)
    .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Device already registered"));
    }

    let device: WearableDevice = sqlx::query_as(
        r#"
        INSERT INTO wearable_devices (id, user_id, vendor, external_id, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(vendor)
    .bind(external_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(device)))
}

/// DELETE /api/wearables/devices/:id - remove an own device
pub async fn remove_device(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query("DELETE FROM wearable_devices WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.user_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Device not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
