//! Fixed-key upload and prefix-wipe helpers.
//!
//! Single-image entities (manga covers, team covers, badge icons, forum
//! banners) live at one fixed key per entity and are always overwritten in
//! place. Entity deletion enumerates the whole prefix and bulk-deletes it so
//! no objects outlive their owning row.

use crate::ObjectStorage;
use tankobon_core::{ImageRef, NewImage};
use tankobon_error::TankobonResult;

/// Upload a single fixed-key image, overwriting any previous object.
#[tracing::instrument(skip(storage, image), fields(filename = %image.filename))]
pub async fn upload_single(
    storage: &dyn ObjectStorage,
    key: &str,
    image: NewImage,
) -> TankobonResult<ImageRef> {
    storage.put(key, &image.bytes).await
}

/// Remove every object under an entity prefix.
#[tracing::instrument(skip(storage))]
pub async fn wipe_prefix(storage: &dyn ObjectStorage, prefix: &str) -> TankobonResult<()> {
    let keys = storage.list(prefix).await?;
    if keys.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = keys.len(), "Wiping storage prefix");
    storage.delete(&keys).await
}
