//! Blob store trait for pluggable content storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for content blob backends.
///
/// Document content blobs are small text payloads written and read whole,
/// so the port works at the byte level. Implementations exist for the
/// local filesystem and S3.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a blob at the given key, replacing any previous value.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read the blob at the given key.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob at the given key. Deleting a missing key is not an
    /// error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
