//! Persistence mapping for the user aggregate.
//!
//! `from_record` reconstructs without re-running creation-time side
//! effects: the stored hash is wrapped, never re-hashed, and the stored
//! timestamps are kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use docshelf_core::AppResult;
use docshelf_core::types::UserId;

use super::model::User;
use super::password::PasswordHash;
use super::role::UserRole;

/// One row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    /// Primary key.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Account role.
    pub role: UserRole,
    /// PHC-format password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Flatten a user to its persisted shape, re-validating first.
pub fn to_record(user: &User) -> AppResult<UserRecord> {
    user.validate()?;
    Ok(UserRecord {
        id: user.id(),
        username: user.username().to_string(),
        role: user.role(),
        password_hash: user.password_hash().as_str().to_string(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    })
}

/// Reconstruct a user from its persisted row.
pub fn from_record(record: UserRecord) -> AppResult<User> {
    let hash = PasswordHash::new(record.password_hash)?;
    Ok(User::from_parts(
        record.id,
        record.username,
        record.role,
        hash,
        record.created_at,
        record.updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        let hash = PasswordHash::new(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG",
        )
        .expect("valid hash");
        User::create("alice", hash).expect("valid user")
    }

    #[test]
    fn test_round_trip_is_field_wise_equal() {
        let user = sample();
        let record = to_record(&user).expect("flatten");
        let restored = from_record(record).expect("reconstruct");
        assert_eq!(restored, user);
    }

    #[test]
    fn test_from_record_rejects_malformed_hash() {
        let mut record = to_record(&sample()).expect("flatten");
        record.password_hash = "plaintext-oops".to_string();
        assert!(from_record(record).is_err());
    }

    #[test]
    fn test_record_serialization_omits_hash() {
        let record = to_record(&sample()).expect("flatten");
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("username").is_some());
    }
}
