//! Storage gateway trait definition.

use tankobon_core::ImageRef;
use tankobon_error::TankobonResult;

/// Trait for pluggable image storage backends.
///
/// Keys are `/`-separated paths partitioned per entity (see
/// `tankobon_core::chapter_prefix` and friends). Implementations map keys to
/// public references however they like, but the mapping must be stable: the
/// same key always yields the same reference.
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store encoded image bytes under a key, overwriting any previous object.
    ///
    /// Returns the stable public reference for the object.
    async fn put(&self, key: &str, bytes: &[u8]) -> TankobonResult<ImageRef>;

    /// Delete the given keys.
    ///
    /// Keys that are already absent are a no-op, not an error. Retry policy,
    /// if any, belongs to the implementation; callers never retry.
    async fn delete(&self, keys: &[String]) -> TankobonResult<()>;

    /// List every key under a prefix.
    ///
    /// Used by entity-deletion paths to enumerate all objects before a bulk
    /// delete. An unknown prefix yields an empty list.
    async fn list(&self, prefix: &str) -> TankobonResult<Vec<String>>;
}
