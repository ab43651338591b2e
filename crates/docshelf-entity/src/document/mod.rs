//! Document aggregate: model, tags, metadata tree, allow-lists, filter,
//! and persistence mapper.

pub mod content;
pub mod filter;
pub mod mapper;
pub mod metadata;
pub mod model;
pub mod tag;

pub use filter::DocumentFilter;
pub use mapper::{DocumentRecord, TagRecord};
pub use metadata::MetadataValue;
pub use model::{Document, DocumentUpdate, NewDocument};
pub use tag::{Tag, TagCollection};
