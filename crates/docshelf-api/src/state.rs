//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use docshelf_auth::jwt::JwtDecoder;
use docshelf_core::config::AppConfig;
use docshelf_service::{AuthService, DocumentService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login and token refresh.
    pub auth_service: Arc<AuthService>,
    /// User account operations.
    pub user_service: Arc<UserService>,
    /// Document operations.
    pub document_service: Arc<DocumentService>,
}
