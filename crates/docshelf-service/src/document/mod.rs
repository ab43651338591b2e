//! Document services.

pub mod service;

pub use service::{CreateDocumentInput, DocumentService, UpdateDocumentInput};
