//! Repository implementations for all Docshelf entities.

pub mod document;
pub mod user;

pub use document::PgDocumentRepository;
pub use user::PgUserRepository;
