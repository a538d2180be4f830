//! Generic repository trait for record persistence.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository trait.
///
/// Parameterized over the stored entity, the payload used to create one,
/// and the partial-update payload, so each entity gets a strongly typed
/// repository while backends (SQLite, in-memory) share one seam.
///
/// Records are keyed by a database-assigned integer id. Soft-deleted
/// records are invisible to every method.
#[async_trait]
pub trait Repository<Entity, NewEntity, Patch>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    NewEntity: Send + Sync + 'static,
    Patch: Send + Sync + 'static,
{
    /// Persist a new record and return it with its assigned id and timestamps.
    async fn create(&self, data: &NewEntity) -> AppResult<Entity>;

    /// Return every live record in the entity's natural listing order.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Find a record by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Entity>>;

    /// Apply the fields present in `patch` and return the updated record.
    ///
    /// Fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound)
    /// if no live record has this id.
    async fn update(&self, id: i64, patch: &Patch) -> AppResult<Entity>;

    /// Delete a record by id. Returns `true` if a live record was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
