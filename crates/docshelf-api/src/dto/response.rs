//! Response DTOs — the externally visible projections.
//!
//! `UserResponse` never carries the password hash; `DocumentResponse`
//! embeds the tag snapshot and the metadata tree as plain JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docshelf_auth::jwt::TokenPair;
use docshelf_core::types::pagination::Page;
use docshelf_entity::document::{Document, MetadataValue};
use docshelf_entity::user::User;

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub user_name: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_uuid(),
            user_name: user.username().to_string(),
            role: user.role().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// One tag in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    /// Tag key.
    pub key: String,
    /// Tag name.
    pub name: String,
}

/// Document projection for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    /// Document ID.
    pub id: Uuid,
    /// Owner's user ID.
    pub owner_id: Uuid,
    /// File name.
    pub file_name: String,
    /// File extension.
    pub file_extension: String,
    /// Content type.
    pub content_type: String,
    /// Text payload.
    pub content: String,
    /// Tag snapshot (no ordering guarantee).
    pub tags: Vec<TagResponse>,
    /// Metadata tree, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentResponse {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id().into_uuid(),
            owner_id: document.owner_id().into_uuid(),
            file_name: document.file_name().to_string(),
            file_extension: document.file_extension().to_string(),
            content_type: document.content_type().to_string(),
            content: document.content().to_string(),
            tags: document
                .tags()
                .iter()
                .map(|tag| TagResponse {
                    key: tag.key.clone(),
                    name: tag.name.clone(),
                })
                .collect(),
            metadata: document.metadata().map(MetadataValue::to_json),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}

/// Login response: the token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

/// Refresh response: a fresh access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    /// Access token.
    pub access_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page served (1-based, clamped).
    pub page: u64,
    /// Number of items on this page.
    pub size: u64,
    /// Total items across all pages.
    pub total_items: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    /// Project a domain page into a response page.
    pub fn from_page<S>(page: Page<S>, f: impl FnMut(S) -> T) -> Self {
        let mapped = page.map(f);
        Self {
            items: mapped.items,
            page: mapped.page,
            size: mapped.size,
            total_items: mapped.total_items,
            total_pages: mapped.total_pages,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Database reachability.
    pub database: String,
    /// Crate version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_entity::user::PasswordHash;

    #[test]
    fn test_user_response_omits_password_hash() {
        let hash = PasswordHash::new(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG",
        )
        .expect("valid hash");
        let user = User::create("alice", hash).expect("valid user");
        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).expect("serialize");

        assert_eq!(json.get("userName").unwrap(), "alice");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
