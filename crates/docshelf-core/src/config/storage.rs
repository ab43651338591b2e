//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Which backend serves as the primary blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Blob mirroring disabled; the database holds content alone.
    None,
    /// Local filesystem only.
    Local,
    /// S3 as primary with the local filesystem as fallback.
    S3,
}

/// Blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Primary backend selection.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Root directory for the local provider.
    #[serde(default = "default_local_root")]
    pub local_root: String,
    /// S3 bucket name (required when backend = "s3").
    #[serde(default)]
    pub s3_bucket: Option<String>,
    /// S3 region (required when backend = "s3").
    #[serde(default)]
    pub s3_region: Option<String>,
    /// Timeout applied to the primary backend before falling back.
    #[serde(default = "default_primary_timeout")]
    pub primary_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            local_root: default_local_root(),
            s3_bucket: None,
            s3_region: None,
            primary_timeout_seconds: default_primary_timeout(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::Local
}

fn default_local_root() -> String {
    "data/blobs".to_string()
}

fn default_primary_timeout() -> u64 {
    5
}
