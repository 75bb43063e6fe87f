//! Chapter administration: image-set edits, publish toggling, deletion.

use crate::guard::{handle, require_actor};
use crate::AdminContext;
use tankobon_core::{chapter_prefix, AdminActor, ChapterId, ImageRef, ImageSource, Permission};
use tankobon_error::{AdminError, TankobonResult};
use tankobon_persistence::{AuditedBatch, ChapterPatch, EntityWrite};
use tankobon_storage::{reconcile, wipe_prefix};

/// A full chapter edit submission.
#[derive(Debug, Clone)]
pub struct ChapterEdit {
    /// New position within the manga
    pub index: f64,
    /// New title
    pub name: String,
    /// New volume number
    pub volume: i32,
    /// Submitted image list: kept references mixed with fresh binaries
    pub images: Vec<ImageSource>,
    /// Permutation of `[0, images.len())` giving the final page order
    pub order: Vec<usize>,
}

/// Edit a chapter's metadata and image set.
///
/// Runs the reconciliation engine against the chapter's storage prefix, then
/// persists metadata and the final reference list in one audited batch.
/// A malformed order fails before any storage or persistence side effect.
#[tracing::instrument(skip(ctx, actor, edit), fields(images = edit.images.len()))]
pub async fn edit_chapter(
    ctx: &AdminContext,
    actor: &AdminActor,
    chapter_id: ChapterId,
    edit: ChapterEdit,
) -> TankobonResult<Vec<ImageRef>> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageChapter],
    )
    .await?;
    let chapter = ctx.gateway().chapter(chapter_id).await?;
    let manga = ctx.gateway().manga(chapter.manga_id).await?;

    let prefix = chapter_prefix(chapter.manga_id, chapter.id);
    let images = reconcile(
        ctx.storage(),
        &prefix,
        &chapter.images,
        edit.images,
        &edit.order,
    )
    .await?;

    let batch = AuditedBatch::new(format!(
        "{} edited Chapter {} of Manga {} ({})",
        handle(&me),
        chapter.id,
        manga.name,
        manga.id
    ))
    .with_write(EntityWrite::UpdateChapter {
        id: chapter.id,
        patch: ChapterPatch {
            index: Some(edit.index),
            name: Some(edit.name),
            volume: Some(edit.volume),
            images: Some(images.clone()),
            is_published: None,
        },
    });
    ctx.gateway().commit(batch).await?;

    Ok(images)
}

/// Publish or unpublish a chapter.
///
/// Setting the state it already has is a conflict.
#[tracing::instrument(skip(ctx, actor))]
pub async fn set_chapter_published(
    ctx: &AdminContext,
    actor: &AdminActor,
    chapter_id: ChapterId,
    published: bool,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageChapter],
    )
    .await?;
    let chapter = ctx.gateway().chapter(chapter_id).await?;
    let manga = ctx.gateway().manga(chapter.manga_id).await?;

    if chapter.is_published == published {
        let state = if published { "published" } else { "unpublished" };
        Err(AdminError::conflict(format!("chapter is already {state}")))?;
    }

    let action = if published { "published" } else { "unpublished" };
    let batch = AuditedBatch::new(format!(
        "{} {} Chapter {} of Manga {} ({})",
        handle(&me),
        action,
        chapter.id,
        manga.name,
        manga.id
    ))
    .with_write(EntityWrite::UpdateChapter {
        id: chapter.id,
        patch: ChapterPatch {
            is_published: Some(published),
            ..ChapterPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Delete a chapter and every image object under its prefix.
///
/// Storage is wiped before the row is removed, so a storage failure leaves
/// the chapter intact and retryable.
#[tracing::instrument(skip(ctx, actor))]
pub async fn delete_chapter(
    ctx: &AdminContext,
    actor: &AdminActor,
    chapter_id: ChapterId,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageChapter],
    )
    .await?;
    let chapter = ctx.gateway().chapter(chapter_id).await?;
    let manga = ctx.gateway().manga(chapter.manga_id).await?;

    wipe_prefix(ctx.storage(), &chapter_prefix(chapter.manga_id, chapter.id)).await?;

    let batch = AuditedBatch::new(format!(
        "{} deleted Chapter {} of Manga {} ({})",
        handle(&me),
        chapter.id,
        manga.name,
        manga.id
    ))
    .with_write(EntityWrite::DeleteChapter { id: chapter.id });
    ctx.gateway().commit(batch).await
}
