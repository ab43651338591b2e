//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};

use docshelf_core::types::UserId;
use docshelf_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the access token claims and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, username: String, role: UserRole) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the current user may act on the given user's account
    /// (themselves, or anyone when admin).
    pub fn can_act_on_user(&self, target: UserId) -> bool {
        self.is_admin() || self.user_id == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_act_on_anyone() {
        let ctx = RequestContext::new(UserId::new(), "root".to_string(), UserRole::Admin);
        assert!(ctx.can_act_on_user(UserId::new()));
    }

    #[test]
    fn test_user_can_act_only_on_self() {
        let id = UserId::new();
        let ctx = RequestContext::new(id, "alice".to_string(), UserRole::User);
        assert!(ctx.can_act_on_user(id));
        assert!(!ctx.can_act_on_user(UserId::new()));
    }
}
