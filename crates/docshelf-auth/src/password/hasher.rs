//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use docshelf_core::AppError;
use docshelf_entity::user::PasswordHash as StoredHash;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt,
    /// producing the domain's stored-hash value object.
    pub fn hash_password(&self, password: &str) -> Result<StoredHash, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        StoredHash::new(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &StoredHash) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash.as_str())
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        let argon2 = Argon2::default();
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Correct-Horse-7!").expect("hash");
        assert!(hasher.verify_password("Correct-Horse-7!", &hash).unwrap());
        assert!(!hasher.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("Correct-Horse-7!").expect("hash");
        let b = hasher.hash_password("Correct-Horse-7!").expect("hash");
        assert_ne!(a, b); // random salts
    }

    #[test]
    fn test_changed_password_invalidates_old_plaintext() {
        let hasher = PasswordHasher::new();
        let old = hasher.hash_password("Old-Password-1!").expect("hash");
        let new = hasher.hash_password("New-Password-2!").expect("hash");
        assert!(!hasher.verify_password("Old-Password-1!", &new).unwrap());
        assert!(hasher.verify_password("New-Password-2!", &new).unwrap());
        assert!(hasher.verify_password("Old-Password-1!", &old).unwrap());
    }
}
