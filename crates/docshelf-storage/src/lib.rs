//! # docshelf-storage
//!
//! Blob storage adapters behind the [`BlobStore`] port: local filesystem
//! and S3, plus a [`StorageManager`] that applies a fixed timeout to the
//! primary backend and falls back to the secondary on timeout or error.
//!
//! [`BlobStore`]: docshelf_core::traits::BlobStore
//! [`StorageManager`]: manager::StorageManager

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
pub use providers::local::LocalBlobStore;
pub use providers::s3::S3BlobStore;
