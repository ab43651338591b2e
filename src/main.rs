//! Docshelf server — headless document management API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use docshelf_api::AppState;
use docshelf_auth::jwt::{JwtDecoder, JwtEncoder};
use docshelf_auth::password::{PasswordHasher, PasswordValidator};
use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_database::repositories::{PgDocumentRepository, PgUserRepository};
use docshelf_service::{
    AuthService, DocumentService, UserService, WebhookNotifier,
};
use docshelf_storage::StorageManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCSHELF_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Docshelf v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = docshelf_database::connection::create_pool(&config.database).await?;
    docshelf_database::migration::run_migrations(&db_pool).await?;

    // ── Blob storage ─────────────────────────────────────────────
    let storage = Arc::new(StorageManager::from_config(&config.storage).await?);
    if storage.is_enabled() {
        tracing::info!(backend = ?config.storage.backend, "Blob storage initialized");
    } else {
        tracing::info!("Blob storage disabled; content lives in the database only");
    }

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(PgUserRepository::new(db_pool.clone()));
    let document_repo = Arc::new(PgDocumentRepository::new(db_pool.clone()));

    // ── Auth primitives ──────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Notification channel ─────────────────────────────────────
    let notifier = Arc::new(WebhookNotifier::new(config.notification.clone())?);

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        hasher.clone(),
        password_validator.clone(),
        notifier.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        hasher.clone(),
        jwt_encoder.clone(),
        jwt_decoder.clone(),
    ));
    let document_service = Arc::new(DocumentService::new(
        document_repo.clone(),
        storage.clone(),
        notifier.clone(),
    ));

    // ── Bootstrap admin ──────────────────────────────────────────
    if let (Some(username), Some(password)) = (
        config.auth.bootstrap_admin_username.as_deref(),
        config.auth.bootstrap_admin_password.as_deref(),
    ) {
        user_service.bootstrap_admin(username, password).await?;
    }

    // ── HTTP server ──────────────────────────────────────────────
    let bind_addr = config.server.bind_addr();
    let state = AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        auth_service,
        user_service,
        document_service,
    };
    let router = docshelf_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    tracing::info!(addr = %bind_addr, "Docshelf listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    tracing::info!("Docshelf stopped");
    Ok(())
}

/// Resolve when ctrl-c arrives.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
