//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pagination::{Page, PageRequest};

/// Generic CRUD repository trait.
///
/// This trait is defined with generic type parameters so that each
/// entity can have a strongly typed repository. Entity-specific
/// query methods are defined on the concrete repository structs.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Find all entities with pagination.
    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Entity>>;

    /// Persist a new entity.
    async fn insert(&self, entity: &Entity) -> AppResult<()>;

    /// Replace an existing entity in full. Fails with NotFound when the
    /// row is missing.
    async fn update(&self, entity: &Entity) -> AppResult<()>;

    /// Delete an entity by its primary key. Fails with NotFound when the
    /// row is missing.
    async fn delete(&self, id: &Id) -> AppResult<()>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
