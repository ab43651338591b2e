//! # docshelf-api
//!
//! The axum HTTP surface: router, shared state, request/response DTOs,
//! auth extraction, role guards, and the error-to-status mapping. The
//! wire contract uses camelCase field names; everything behind it is
//! snake_case.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
