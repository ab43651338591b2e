//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use docshelf_core::AppError;
use docshelf_core::config::AuthConfig;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
///
/// Refresh validation is stateless: a refresh token is good until its
/// expiry, checked by signature and token type alone.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_with(token, &self.access_key)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_with(token, &self.refresh_key)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Invalid token type: expected refresh token",
            ));
        }
        Ok(claims)
    }

    fn decode_with(&self, token: &str, key: &DecodingKey) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use docshelf_entity::user::{PasswordHash, User};

    fn config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret-for-tests".to_string(),
            refresh_token_secret: "refresh-secret-for-tests".to_string(),
            ..AuthConfig::default()
        }
    }

    fn user() -> User {
        let hash = PasswordHash::new(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG",
        )
        .expect("valid hash");
        User::create("alice", hash).expect("valid user")
    }

    #[test]
    fn test_access_token_round_trip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user = user();

        let pair = encoder.generate_token_pair(&user).expect("token pair");
        let claims = decoder
            .decode_access_token(&pair.access_token)
            .expect("valid access token");

        assert_eq!(claims.sub, user.id());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder.generate_token_pair(&user()).expect("token pair");
        // Wrong key and wrong type; either way it must not authenticate.
        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder.generate_token_pair(&user()).expect("token pair");
        let claims = decoder
            .decode_refresh_token(&pair.refresh_token)
            .expect("valid refresh token");
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder.generate_token_pair(&user()).expect("token pair");
        let mut tampered = pair.access_token.clone();
        tampered.push('x');
        assert!(decoder.decode_access_token(&tampered).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let decoder = JwtDecoder::new(&config());
        assert!(decoder.decode_access_token("not.a.jwt").is_err());
        assert!(decoder.decode_access_token("").is_err());
    }
}
