//! # docshelf-core
//!
//! Core crate for Docshelf. Contains traits, configuration schemas, typed
//! identifiers, notification events, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Docshelf crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
