//! Outbound webhook notification delivery.

pub mod sender;

pub use sender::WebhookNotifier;
