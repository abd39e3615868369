use anyhow::Context as _;
use aws_sdk_s3::error::{ProvideErrorMetadata as _, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use uuid::Uuid;

use crate::domain::repository::ObjectStorage;
use crate::error::ApiError;

/// S3-compatible photo storage. Every upload is re-encoded to PNG, so stored
/// objects have a single content type and carry none of the original file's
/// metadata.
#[derive(Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// `endpoint` is the storage API endpoint; objects are served path-style
    /// as `{endpoint}/{bucket}/{key}`.
    pub fn new(client: aws_sdk_s3::Client, bucket: String, endpoint: &str) -> Self {
        let public_base_url = format!("{}/{}", endpoint.trim_end_matches('/'), bucket);
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

impl ObjectStorage for S3Storage {
    async fn upload_image(&self, folder: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let png = encode_png(bytes).await?;
        let key = format!("{}/{}.png", folder, Uuid::new_v4());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(png))
            .acl(ObjectCannedAcl::PublicRead)
            .content_type("image/png")
            .send()
            .await
            .map_err(upload_error)?;

        tracing::debug!(key = %key, "uploaded object");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Decode and re-encode as PNG on the blocking pool; image work is CPU-bound.
async fn encode_png(bytes: Vec<u8>) -> Result<Vec<u8>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&bytes)
            .map_err(|_| ApiError::invalid("photo", "Expected an image file"))?;
        let mut out = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("encode png: {e}")))?;
        Ok(out)
    })
    .await
    .context("join image encode task")?
}

fn upload_error(err: SdkError<PutObjectError>) -> ApiError {
    // The one failure the caller can act on; everything else is ours.
    if err.code() == Some("EntityTooLarge") {
        return ApiError::PayloadTooLarge;
    }
    ApiError::Internal(anyhow::Error::new(err).context("upload object to storage"))
}
