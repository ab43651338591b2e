//! # docshelf-entity
//!
//! Domain aggregates for Docshelf. A `Document` owns its tag collection
//! and optional metadata tree; a `User` owns its credentials and role.
//! Aggregates validate themselves at construction and after every
//! mutation, and each mutation bumps the aggregate's `updated_at`.
//!
//! Persistence mappers (`mapper` submodules) flatten aggregates to
//! row-shaped records and back; response projection lives in the api
//! crate.

pub mod document;
pub mod user;
