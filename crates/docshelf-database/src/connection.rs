//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use docshelf_core::config::DatabaseConfig;
use docshelf_core::error::{AppError, ErrorKind};

/// Create a connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    info!(
        url = %mask_password(&config.url),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    info!("Successfully connected to PostgreSQL");
    Ok(pool)
}

/// Check database connectivity.
pub async fn health_check(pool: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|one| one == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
}

/// Hide the password portion of a connection URL for logging.
fn mask_password(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or("");
                format!("{scheme}://{user}:****@{host}")
            }
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password_hides_secret() {
        let masked = mask_password("postgres://app:s3cret@db:5432/docshelf");
        assert_eq!(masked, "postgres://app:****@db:5432/docshelf");
    }

    #[test]
    fn test_mask_password_without_credentials() {
        let url = "postgres://db:5432/docshelf";
        assert_eq!(mask_password(url), url);
    }
}
