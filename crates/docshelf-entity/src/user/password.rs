//! Password hash value object.

use serde::{Deserialize, Serialize};

use docshelf_core::{AppError, AppResult};

/// A stored password hash in PHC string format
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
///
/// The aggregate never holds plaintext: hashing happens in the auth crate
/// before a value of this type can be constructed, and construction
/// re-checks the format so a malformed hash cannot enter the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed hash, rejecting anything that does not
    /// look like a PHC string.
    pub fn new(hash: impl Into<String>) -> AppResult<Self> {
        let hash = hash.into();
        if !is_phc_format(&hash) {
            return Err(AppError::validation(
                "Password hash is not in a recognized format",
            ));
        }
        Ok(Self(hash))
    }

    /// The hash string, for verification by the hashing primitive.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw hash string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Structural PHC check: `$<id>$<segment>...` with a non-empty
/// alphanumeric algorithm id and at least two further segments.
fn is_phc_format(hash: &str) -> bool {
    let mut segments = hash.split('$');
    let Some("") = segments.next() else {
        return false;
    };
    let Some(id) = segments.next() else {
        return false;
    };
    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return false;
    }
    segments.filter(|s| !s.is_empty()).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

    #[test]
    fn test_accepts_phc_string() {
        assert!(PasswordHash::new(SAMPLE).is_ok());
    }

    #[test]
    fn test_rejects_plaintext_and_garbage() {
        assert!(PasswordHash::new("hunter2").is_err());
        assert!(PasswordHash::new("").is_err());
        assert!(PasswordHash::new("$").is_err());
        assert!(PasswordHash::new("$argon2id$").is_err());
        assert!(PasswordHash::new("no$leading$dollar$sign").is_err());
    }
}
