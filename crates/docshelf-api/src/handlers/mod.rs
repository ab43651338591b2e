//! HTTP request handlers, grouped by resource.

pub mod document;
pub mod health;
pub mod jwt;
pub mod user;
