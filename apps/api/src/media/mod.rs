//! Image hosting for portfolio project pictures.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const KEY_PREFIX: &str = "portfolio-projects";

#[derive(Debug, Error)]
pub enum MediaError {
    /// The upload itself is unacceptable; surfaces as a 400.
    #[error("{0}")]
    Rejected(String),

    #[error("image upload failed: {0}")]
    Upload(String),
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Stores `body` under `key` and returns the public URL of the object.
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, MediaError>;
}

/// File extension for an accepted image content type.
pub fn image_extension(content_type: &str) -> Result<&'static str, MediaError> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        "image/svg+xml" => Ok("svg"),
        _ => Err(MediaError::Rejected("Only image files are allowed".to_string())),
    }
}

/// Validates an uploaded project image and stores it under the owner's prefix.
pub async fn store_project_image(
    host: &dyn ImageHost,
    owner: Uuid,
    content_type: &str,
    body: Bytes,
) -> Result<String, MediaError> {
    let extension = image_extension(content_type)?;
    if body.is_empty() {
        return Err(MediaError::Rejected("No image file provided".to_string()));
    }
    if body.len() > MAX_IMAGE_BYTES {
        return Err(MediaError::Rejected(
            "Image must be 5MB or smaller".to_string(),
        ));
    }

    let key = format!("{KEY_PREFIX}/{owner}/{}.{extension}", Uuid::new_v4());
    let url = host.put(&key, content_type, body).await?;
    info!("Stored project image {key} for user {owner}");
    Ok(url)
}

/// S3 (or MinIO) bucket exposed through a public base URL.
pub struct S3ImageHost {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageHost {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageHost for S3ImageHost {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, MediaError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeImageHost;

    #[tokio::test]
    async fn test_non_image_is_rejected_before_upload() {
        let host = FakeImageHost::default();
        let err = store_project_image(&host, Uuid::new_v4(), "application/pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Rejected(_)));
        assert!(host.keys().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_image_is_rejected() {
        let host = FakeImageHost::default();
        let body = Bytes::from(vec![0u8; MAX_IMAGE_BYTES + 1]);
        let err = store_project_image(&host, Uuid::new_v4(), "image/png", body)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Rejected(msg) if msg.contains("5MB")));
    }

    #[tokio::test]
    async fn test_key_is_scoped_to_owner() {
        let host = FakeImageHost::default();
        let owner = Uuid::new_v4();
        let url = store_project_image(&host, owner, "image/PNG", Bytes::from_static(b"png"))
            .await
            .unwrap();

        let keys = host.keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with(&format!("portfolio-projects/{owner}/")));
        assert!(keys[0].ends_with(".png"));
        assert!(url.ends_with(&keys[0]));
    }
}
