//! User aggregate model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use docshelf_core::{AppError, AppResult};
use docshelf_core::types::UserId;

use super::password::PasswordHash;
use super::role::UserRole;

/// Username length bounds.
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 100;

/// A registered account.
///
/// Credentials enter the aggregate only as a [`PasswordHash`]; plaintext
/// never does. Verification is delegated to the hashing primitive in the
/// auth crate, which compares a candidate plaintext against
/// `password_hash()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    id: UserId,
    username: String,
    role: UserRole,
    #[serde(skip_serializing)]
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a fresh id, defaulting to the regular role.
    pub fn create(username: impl Into<String>, password_hash: PasswordHash) -> AppResult<Self> {
        Self::create_with_role(username, password_hash, UserRole::default())
    }

    /// Create a user with an explicit role (bootstrap admin).
    pub fn create_with_role(
        username: impl Into<String>,
        password_hash: PasswordHash,
        role: UserRole,
    ) -> AppResult<Self> {
        let username = username.into();
        validate_username(&username)?;
        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            username,
            role,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reassemble a user from already-validated parts (mapper use).
    pub(crate) fn from_parts(
        id: UserId,
        username: String,
        role: UserRole,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            role,
            password_hash,
            created_at,
            updated_at,
        }
    }

    /// Re-check the aggregate's invariants (mapper pre-write check).
    pub fn validate(&self) -> AppResult<()> {
        validate_username(&self.username)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user is a regular account.
    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    /// Replace the stored hash with one computed from a new plaintext.
    /// The previous plaintext stops verifying the moment this returns.
    pub fn change_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    if trimmed.len() < USERNAME_MIN || trimmed.len() > USERNAME_MAX {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> PasswordHash {
        PasswordHash::new(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG",
        )
        .expect("valid hash")
    }

    #[test]
    fn test_create_defaults_to_user_role() {
        let user = User::create("alice", hash()).expect("valid user");
        assert!(user.is_user());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_create_rejects_bad_usernames() {
        assert!(User::create("", hash()).is_err());
        assert!(User::create("ab", hash()).is_err());
        assert!(User::create("x".repeat(101), hash()).is_err());
    }

    #[test]
    fn test_change_password_swaps_hash_and_touches() {
        let mut user = User::create("alice", hash()).expect("valid user");
        let before = user.updated_at();
        let new_hash = PasswordHash::new(
            "$argon2id$v=19$m=19456,t=2,p=1$b3RoZXJzYWx0$ZmFrZWhhc2hmYWtlaGFzaA",
        )
        .expect("valid hash");
        user.change_password(new_hash.clone());
        assert_eq!(user.password_hash(), &new_hash);
        assert!(user.updated_at() >= before);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::create("alice", hash()).expect("valid user");
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("password_hash").is_none());
    }
}
