//! Notification events emitted by the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, UserId};

/// An event worth telling the outside world about.
///
/// Serialized as the webhook payload body; the `event` tag identifies the
/// variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A new user registered.
    UserRegistered {
        /// The new user's id.
        user_id: UserId,
        /// The new user's name.
        username: String,
        /// When registration completed.
        occurred_at: DateTime<Utc>,
    },
    /// A document was created.
    DocumentCreated {
        /// The new document's id.
        document_id: DocumentId,
        /// The owning user.
        owner_id: UserId,
        /// The document file name.
        file_name: String,
        /// When creation completed.
        occurred_at: DateTime<Utc>,
    },
    /// A document was updated (full replace).
    DocumentUpdated {
        /// The updated document's id.
        document_id: DocumentId,
        /// The owning user.
        owner_id: UserId,
        /// The document file name after the update.
        file_name: String,
        /// When the update completed.
        occurred_at: DateTime<Utc>,
    },
}

impl NotificationEvent {
    /// A short label for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::DocumentCreated { .. } => "document_created",
            Self::DocumentUpdated { .. } => "document_updated",
        }
    }
}
