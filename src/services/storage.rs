use uuid::Uuid;

use crate::config;
use crate::error::ApiError;

/// Where an analysis video will live in object storage.
#[derive(Debug, Clone)]
pub struct AllocatedObject {
    pub storage_key: String,
    pub upload_url: String,
}

/// Allocate an object-storage location for a new analysis video.
///
/// Storage credentials are optional at startup; this is the first-use point
/// where a missing bucket surfaces as 503 to the caller.
pub fn allocate_video_object(user_id: Uuid) -> Result<AllocatedObject, ApiError> {
    let storage = &config::config().storage;

    let bucket = storage
        .bucket
        .as_deref()
        .ok_or_else(|| ApiError::service_unavailable("Object storage is not configured"))?;
    let region = storage.region.as_deref().unwrap_or("us-east-1");

    let storage_key = format!("videos/{}/{}.mp4", user_id, Uuid::new_v4());
    let upload_url = format!(
        "https://{}.s3.{}.amazonaws.com/{}",
        bucket, region, storage_key
    );

    Ok(AllocatedObject {
        storage_key,
        upload_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_storage_is_service_unavailable() {
        // Default test config carries no STORAGE_BUCKET
        if crate::config::config().storage.bucket.is_none() {
            let err = allocate_video_object(Uuid::new_v4()).unwrap_err();
            assert_eq!(err.status_code(), 503);
        }
    }
}
