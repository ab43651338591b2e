//! Webhook notification sender with fixed-count retry.
//!
//! Delivery is best-effort: a fixed number of attempts with no backoff
//! and no circuit breaker. Exhaustion surfaces as an error the caller
//! logs and swallows; a failed notification never fails the operation
//! that triggered it.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use docshelf_core::config::NotificationConfig;
use docshelf_core::events::NotificationEvent;
use docshelf_core::result::AppResult;
use docshelf_core::traits::Notifier;
use docshelf_core::AppError;

/// Posts events as JSON to a configured webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    config: NotificationConfig,
}

impl WebhookNotifier {
    /// Create a notifier from configuration.
    pub fn new(config: NotificationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build notification client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    async fn post(&self, url: &str, event: &NotificationEvent) -> AppResult<()> {
        let mut request = self.client.post(url).json(event);
        if let Some(token) = &self.config.channel_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::external_service(format!("Webhook request failed: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()> {
        let Some(url) = self.config.webhook_url.clone() else {
            debug!(event = event.name(), "Notification channel disabled, dropping event");
            return Ok(());
        };

        deliver_with_retry(self.config.max_attempts, |attempt| {
            let url = url.clone();
            async move {
                self.post(&url, event).await.inspect_err(|e| {
                    warn!(
                        event = event.name(),
                        attempt,
                        max_attempts = self.config.max_attempts,
                        error = %e,
                        "Notification delivery attempt failed"
                    );
                })
            }
        })
        .await
    }
}

/// Run `attempt` up to `max_attempts` times, returning the first success
/// or the last error. No delay between attempts.
async fn deliver_with_retry<F, Fut>(max_attempts: u32, mut attempt: F) -> AppResult<()>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut last_error = AppError::external_service("Notification delivery never attempted");
    for n in 1..=max_attempts.max(1) {
        match attempt(n).await {
            Ok(()) => return Ok(()),
            Err(e) => last_error = e,
        }
    }
    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(3, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_recovers_before_exhaustion() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(3, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(AppError::external_service("try again"))
                } else {
                    Ok(())
                }
            }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(3, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(AppError::external_service(format!("boom {attempt}"))) }
        })
        .await;
        let err = result.expect_err("exhausted");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(err.message.contains("boom 3"));
    }

    #[tokio::test]
    async fn test_disabled_channel_drops_event() {
        let notifier = WebhookNotifier::new(NotificationConfig::default()).expect("notifier");
        let event = NotificationEvent::UserRegistered {
            user_id: docshelf_core::types::UserId::new(),
            username: "alice".to_string(),
            occurred_at: chrono::Utc::now(),
        };
        assert!(notifier.notify(&event).await.is_ok());
    }
}
