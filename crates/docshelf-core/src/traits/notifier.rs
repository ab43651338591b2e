//! Notifier trait for outbound event delivery.

use async_trait::async_trait;

use crate::events::NotificationEvent;
use crate::result::AppResult;

/// Trait for delivering notification events to an external channel.
///
/// Delivery is best-effort: callers treat a returned error as "gave up",
/// log it, and move on. A notifier must never make the triggering
/// operation fail.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one event, retrying internally as configured.
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()>;
}
