//! Role-based route guards.
//!
//! Handlers on admin-only routes call these before touching a service;
//! the services enforce the same rules again on their own.

use docshelf_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Admin access required"));
    }
    Ok(())
}
