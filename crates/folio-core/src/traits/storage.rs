//! Object store trait for certificate file persistence.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Byte-blob persistence keyed by opaque names.
///
/// Names are generated by the caller and are flat (no directories). The
/// store only guarantees that a successful [`save`](Self::save) can later
/// be read back or deleted under the same name.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the store is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Persist `data` under `name`, replacing any previous object.
    async fn save(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Read a stored object fully into memory.
    async fn read_bytes(&self, name: &str) -> AppResult<Bytes>;

    /// Delete the object stored under `name`. Deleting a missing object is not an error.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Check whether an object exists under `name`.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Public URL of the object stored under `name`.
    fn public_url(&self, base_url: &str, name: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), name)
    }
}
