//! # docshelf-service
//!
//! Application services orchestrating the domain aggregates with the
//! repository, auth, storage, and notification adapters. Services own
//! authorization decisions (self-or-admin, admin-only); aggregates own
//! their structural invariants.

pub mod auth;
pub mod context;
pub mod document;
pub mod notification;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use document::DocumentService;
pub use notification::WebhookNotifier;
pub use user::UserService;
