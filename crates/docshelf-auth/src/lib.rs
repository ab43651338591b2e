//! # docshelf-auth
//!
//! JWT token issuance and validation plus password hashing and policy
//! enforcement. The cryptographic work is delegated to `jsonwebtoken`
//! and `argon2`; this crate owns the claims shape, the access/refresh
//! split, and the password policy.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
