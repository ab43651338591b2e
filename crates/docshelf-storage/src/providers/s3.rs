//! S3 blob store.
//!
//! Credentials come from the default AWS provider chain (environment,
//! profile, instance metadata); only bucket and region are configured
//! here.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::BlobStore;

/// S3 blob store bound to one bucket.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Create a new S3 blob store for the given bucket and region.
    pub async fn new(bucket: &str, region: &str) -> AppResult<Self> {
        info!(bucket, region, "Initializing S3 blob store");

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Ok(Self {
            client: Client::new(&config),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("S3 put failed for key '{key}'"),
                    e,
                )
            })?;

        debug!(key, bytes = size, "Wrote blob to S3");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|s| s.is_no_such_key()) {
                    AppError::not_found(format!("Blob not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("S3 get failed for key '{key}'"),
                        e,
                    )
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("S3 body read failed for key '{key}'"),
                e,
            )
        })?;

        Ok(data.into_bytes())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("S3 delete failed for key '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|s| s.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("S3 head failed for key '{key}'"),
                e,
            )),
        }
    }
}
