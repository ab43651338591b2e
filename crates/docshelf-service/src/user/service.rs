//! User registration, lookup, password changes, and admin management.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use docshelf_auth::password::{PasswordHasher, PasswordValidator};
use docshelf_core::error::AppError;
use docshelf_core::events::NotificationEvent;
use docshelf_core::traits::{Notifier, Repository};
use docshelf_core::types::UserId;
use docshelf_core::types::pagination::{Page, PageRequest};
use docshelf_database::repositories::PgUserRepository;
use docshelf_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<PgUserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    notifier: Arc<dyn Notifier>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<PgUserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            notifier,
        }
    }

    /// Registers a new account with the default role.
    ///
    /// Registration succeeds even when the notification ultimately fails;
    /// delivery runs detached and exhaustion is only logged.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.validator.validate(password)?;
        let hash = self.hasher.hash_password(password)?;
        let user = User::create(username, hash)?;

        self.user_repo.insert(&user).await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");

        let notifier = self.notifier.clone();
        let event = NotificationEvent::UserRegistered {
            user_id: user.id(),
            username: user.username().to_string(),
            occurred_at: Utc::now(),
        };
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&event).await {
                warn!(error = %e, "Registration notification gave up");
            }
        });

        Ok(user)
    }

    /// Fetches one user; permitted for the user themselves or an admin.
    pub async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, AppError> {
        if !ctx.can_act_on_user(id) {
            return Err(AppError::authorization(
                "Only the account owner or an admin may view this user",
            ));
        }

        self.user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Lists users with pagination; admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<Page<User>, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may list users"));
        }
        self.user_repo.find_all(&page).await
    }

    /// Changes a user's password; permitted for the user themselves or an
    /// admin. The previous plaintext stops working immediately.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        id: UserId,
        new_password: &str,
    ) -> Result<User, AppError> {
        if !ctx.can_act_on_user(id) {
            return Err(AppError::authorization(
                "Only the account owner or an admin may change this password",
            ));
        }

        let mut user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        self.validator.validate(new_password)?;
        if self
            .hasher
            .verify_password(new_password, user.password_hash())?
        {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }

        let hash = self.hasher.hash_password(new_password)?;
        user.change_password(hash);
        self.user_repo.update(&user).await?;

        info!(user_id = %id, "Password changed");
        Ok(user)
    }

    /// Deletes a user account; admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), AppError> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may delete users"));
        }
        self.user_repo.delete(&id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Creates the configured admin account if no admin exists yet.
    /// Called once at startup.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.admin_exists().await? {
            return Ok(());
        }

        self.validator.validate(password)?;
        let hash = self.hasher.hash_password(password)?;
        let admin = User::create_with_role(username, hash, UserRole::Admin)?;
        self.user_repo.insert(&admin).await?;

        info!(username = %username, "Bootstrap admin created");
        Ok(())
    }
}
