//! # docshelf-database
//!
//! PostgreSQL adapter crate: connection pool management, the migration
//! runner, and the repository implementations behind the core ports.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::{PgDocumentRepository, PgUserRepository};
