//! Notification delivery configuration.

use serde::{Deserialize, Serialize};

/// Webhook notification configuration.
///
/// When `webhook_url` is unset, notification delivery is disabled and
/// events are dropped silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Webhook endpoint to POST events to.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Bearer token identifying the notification channel.
    #[serde(default)]
    pub channel_token: Option<String>,
    /// Number of delivery attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel_token: None,
            max_attempts: default_max_attempts(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    10
}
