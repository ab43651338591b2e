//! Route definitions for the Docshelf HTTP API.
//!
//! Routes are organized by resource. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes as usize;

    Router::new()
        .merge(user_routes())
        .merge(jwt_routes())
        .merge(document_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Registration and user management.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::user::register))
        .route("/user", get(handlers::user::list_users))
        .route("/user/{id}", get(handlers::user::get_user))
        .route("/user/{id}", put(handlers::user::change_password))
        .route("/user/{id}", delete(handlers::user::delete_user))
}

/// Login and token refresh.
fn jwt_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(handlers::jwt::login))
        .route("/jwt/refreshtoken", post(handlers::jwt::refresh))
}

/// Document CRUD plus tag and metadata sub-resources.
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/document", get(handlers::document::list_documents))
        .route("/document", post(handlers::document::create_document))
        .route("/document/{id}", get(handlers::document::get_document))
        .route("/document/{id}", put(handlers::document::update_document))
        .route(
            "/document/{id}",
            delete(handlers::document::delete_document),
        )
        .route("/document/{id}/tag", post(handlers::document::add_tag))
        .route("/document/{id}/tag", put(handlers::document::update_tag))
        .route(
            "/document/{id}/tag/{key}",
            delete(handlers::document::remove_tag),
        )
        .route("/document/{id}/meta", put(handlers::document::update_meta))
        .route(
            "/document/{id}/meta",
            delete(handlers::document::delete_meta),
        )
}

/// Liveness.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
