//! Credential login and stateless token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use docshelf_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use docshelf_auth::password::PasswordHasher;
use docshelf_core::error::AppError;
use docshelf_core::traits::Repository;
use docshelf_database::repositories::PgUserRepository;

/// Handles login and refresh.
///
/// Refresh is stateless: a refresh token is honored until expiry based on
/// its signature and token type alone, with the user re-read so a deleted
/// account cannot mint new access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<PgUserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<PgUserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Verifies credentials and issues an access + refresh token pair.
    ///
    /// Unknown usernames and wrong passwords fail identically so the
    /// response does not leak which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        let valid = self
            .hasher
            .verify_password(password, user.password_hash())?;
        if !valid {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let pair = self.encoder.generate_token_pair(&user)?;
        info!(user_id = %user.id(), "Login succeeded");
        Ok(pair)
    }

    /// Exchanges a valid refresh token for a fresh access token.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        self.encoder.generate_access_token(&user)
    }
}
