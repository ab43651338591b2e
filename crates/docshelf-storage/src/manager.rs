//! Primary/fallback blob store dispatch.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::warn;

use docshelf_core::config::{StorageBackend, StorageConfig};
use docshelf_core::result::AppResult;
use docshelf_core::traits::BlobStore;
use docshelf_core::AppError;

use crate::providers::local::LocalBlobStore;
use crate::providers::s3::S3BlobStore;

/// Dispatches blob operations to a primary provider with a fixed timeout,
/// falling back to a secondary provider on timeout or error.
///
/// The fallback is best-effort and unordered: a blob written to the
/// fallback is not replayed to the primary later.
#[derive(Debug, Clone)]
pub struct StorageManager {
    primary: Option<Arc<dyn BlobStore>>,
    fallback: Option<Arc<dyn BlobStore>>,
    primary_timeout: Duration,
}

impl StorageManager {
    /// Assemble a manager from explicit providers (test seam).
    pub fn new(
        primary: Option<Arc<dyn BlobStore>>,
        fallback: Option<Arc<dyn BlobStore>>,
        primary_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            primary_timeout,
        }
    }

    /// Build the configured provider arrangement.
    ///
    /// - `none`: blob mirroring disabled.
    /// - `local`: the local filesystem alone.
    /// - `s3`: S3 as primary, local filesystem as fallback.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let primary_timeout = Duration::from_secs(config.primary_timeout_seconds);

        match config.backend {
            StorageBackend::None => Ok(Self::new(None, None, primary_timeout)),
            StorageBackend::Local => {
                let local = LocalBlobStore::new(&config.local_root).await?;
                Ok(Self::new(Some(Arc::new(local)), None, primary_timeout))
            }
            StorageBackend::S3 => {
                let bucket = config.s3_bucket.as_deref().ok_or_else(|| {
                    AppError::configuration("storage.s3_bucket is required for the s3 backend")
                })?;
                let region = config.s3_region.as_deref().ok_or_else(|| {
                    AppError::configuration("storage.s3_region is required for the s3 backend")
                })?;
                let s3 = S3BlobStore::new(bucket, region).await?;
                let local = LocalBlobStore::new(&config.local_root).await?;
                Ok(Self::new(
                    Some(Arc::new(s3)),
                    Some(Arc::new(local)),
                    primary_timeout,
                ))
            }
        }
    }

    /// Whether any backend is configured.
    pub fn is_enabled(&self) -> bool {
        self.primary.is_some()
    }

    /// Write a blob through the primary, falling back on timeout/error.
    pub async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.dispatch(key, |store| {
            let data = data.clone();
            async move { store.put(key, data).await }
        })
        .await
    }

    /// Read a blob through the primary, falling back on timeout/error.
    pub async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.dispatch(key, |store| async move { store.get(key).await })
            .await
    }

    /// Delete a blob from both providers (idempotent on each).
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.dispatch(key, |store| async move { store.delete(key).await })
            .await
    }

    async fn dispatch<'a, T, F, Fut>(&'a self, key: &'a str, op: F) -> AppResult<T>
    where
        F: Fn(Arc<dyn BlobStore>) -> Fut,
        Fut: Future<Output = AppResult<T>> + 'a,
    {
        let Some(primary) = &self.primary else {
            return Err(AppError::storage("No blob storage backend configured"));
        };

        let primary_result =
            match tokio::time::timeout(self.primary_timeout, op(primary.clone())).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(AppError::storage(format!(
                    "{} backend timed out after {:?}",
                    primary.provider_type(),
                    self.primary_timeout
                ))),
            };

        match (&self.fallback, primary_result) {
            (Some(fallback), Err(e)) => {
                warn!(
                    key,
                    primary = primary.provider_type(),
                    fallback = fallback.provider_type(),
                    error = %e,
                    "Primary blob store failed, using fallback"
                );
                op(fallback.clone()).await
            }
            (None, Err(e)) => Err(e),
            // Unreachable: the Ok arm returned above.
            (_, Ok(value)) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    /// A provider that always fails, optionally after a delay.
    #[derive(Debug)]
    struct BrokenStore {
        delay: Duration,
    }

    #[async_trait]
    impl BlobStore for BrokenStore {
        fn provider_type(&self) -> &str {
            "broken"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }

        async fn put(&self, _key: &str, _data: Bytes) -> AppResult<()> {
            tokio::time::sleep(self.delay).await;
            Err(AppError::storage("broken store"))
        }

        async fn get(&self, _key: &str) -> AppResult<Bytes> {
            tokio::time::sleep(self.delay).await;
            Err(AppError::storage("broken store"))
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            tokio::time::sleep(self.delay).await;
            Err(AppError::storage("broken store"))
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(false)
        }
    }

    async fn local(dir: &tempfile::TempDir) -> Arc<dyn BlobStore> {
        Arc::new(
            LocalBlobStore::new(dir.path().to_str().unwrap())
                .await
                .expect("local store"),
        )
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let manager = StorageManager::new(
            Some(Arc::new(BrokenStore {
                delay: Duration::ZERO,
            })),
            Some(local(&dir).await),
            Duration::from_secs(1),
        );

        manager
            .put("k", Bytes::from_static(b"v"))
            .await
            .expect("fallback write");
        assert_eq!(&manager.get("k").await.expect("fallback read")[..], b"v");
    }

    #[tokio::test]
    async fn test_primary_timeout_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let manager = StorageManager::new(
            Some(Arc::new(BrokenStore {
                delay: Duration::from_secs(30),
            })),
            Some(local(&dir).await),
            Duration::from_millis(20),
        );

        manager
            .put("slow", Bytes::from_static(b"v"))
            .await
            .expect("fallback write after timeout");
    }

    #[tokio::test]
    async fn test_no_fallback_surfaces_primary_error() {
        let manager = StorageManager::new(
            Some(Arc::new(BrokenStore {
                delay: Duration::ZERO,
            })),
            None,
            Duration::from_secs(1),
        );

        assert!(manager.put("k", Bytes::from_static(b"v")).await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_manager_reports_no_backend() {
        let manager = StorageManager::new(None, None, Duration::from_secs(1));
        assert!(!manager.is_enabled());
        assert!(manager.get("k").await.is_err());
    }

    #[tokio::test]
    async fn test_healthy_primary_serves_directly() {
        let dir = tempfile::tempdir().unwrap();
        let manager = StorageManager::new(
            Some(local(&dir).await),
            Some(Arc::new(BrokenStore {
                delay: Duration::ZERO,
            })),
            Duration::from_secs(1),
        );

        manager
            .put("k", Bytes::from_static(b"direct"))
            .await
            .expect("primary write");
        assert_eq!(&manager.get("k").await.expect("primary read")[..], b"direct");
    }
}
