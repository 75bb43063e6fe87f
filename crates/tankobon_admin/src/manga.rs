//! Manga administration: edits, ownership transfer, deletion.

use crate::guard::{handle, require_actor, require_actor_where};
use crate::AdminContext;
use futures::future;
use tankobon_core::{
    chapter_prefix, manga_cover_key, manga_prefix, AdminActor, ImageSource, MangaId, Permission,
    UserId,
};
use tankobon_error::TankobonResult;
use tankobon_persistence::{AuditedBatch, EntityWrite, MangaPatch};
use tankobon_storage::{upload_single, wipe_prefix};

/// A manga edit submission.
///
/// `slug: None` (or a blank slug) keeps the current one; `cover: None` keeps
/// the current cover.
#[derive(Debug, Clone)]
pub struct MangaEdit {
    /// New URL slug, if changing
    pub slug: Option<String>,
    /// New primary title
    pub name: String,
    /// New alternative title (`None` clears it)
    pub alt_name: Option<String>,
    /// New cover: keep a reference or upload fresh bytes
    pub cover: Option<ImageSource>,
    /// New facebook link (`None` clears it)
    pub facebook_link: Option<String>,
    /// New discord link (`None` clears it)
    pub discord_link: Option<String>,
}

/// Edit a manga's metadata and cover. Returns the slug now in effect.
///
/// A fresh cover overwrites the fixed cover key in place, so the stored
/// reference survives the swap. Slug uniqueness is enforced at commit.
/// Guarded by the chapter-management permission: editing a title is part of
/// the chapter curation workflow.
#[tracing::instrument(skip(ctx, actor, edit))]
pub async fn edit_manga(
    ctx: &AdminContext,
    actor: &AdminActor,
    manga_id: MangaId,
    edit: MangaEdit,
) -> TankobonResult<String> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageChapter],
    )
    .await?;
    let manga = ctx.gateway().manga(manga_id).await?;

    let cover = match edit.cover {
        Some(ImageSource::New(image)) => {
            Some(upload_single(ctx.storage(), &manga_cover_key(manga.id), image).await?)
        }
        Some(ImageSource::Existing(reference)) => Some(reference),
        None => manga.cover.clone(),
    };

    let slug = edit
        .slug
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| manga.slug.clone());

    let batch = AuditedBatch::new(format!(
        "{} edited Manga {} ({})",
        handle(&me),
        edit.name,
        manga.id
    ))
    .with_write(EntityWrite::UpdateManga {
        id: manga.id,
        patch: MangaPatch {
            slug: Some(slug.clone()),
            name: Some(edit.name),
            alt_name: Some(edit.alt_name),
            cover,
            creator_id: None,
            facebook_link: Some(edit.facebook_link),
            discord_link: Some(edit.discord_link),
        },
    });
    ctx.gateway().commit(batch).await?;

    Ok(slug)
}

/// Transfer a manga to a different owning account.
///
/// Requires administrator, or both manage-manga and manage-user.
#[tracing::instrument(skip(ctx, actor))]
pub async fn transfer_manga_creator(
    ctx: &AdminContext,
    actor: &AdminActor,
    manga_id: MangaId,
    new_creator: &UserId,
) -> TankobonResult<()> {
    let me = require_actor_where(
        ctx,
        actor,
        "ADMINISTRATOR or MANAGE_MANGA and MANAGE_USER",
        |user| {
            user.permissions.is_administrator()
                || user
                    .permissions
                    .has_every(&[Permission::ManageManga, Permission::ManageUser])
        },
    )
    .await?;
    let manga = ctx.gateway().manga(manga_id).await?;
    let recipient = ctx.gateway().user(new_creator).await?;

    let batch = AuditedBatch::new(format!(
        "{} transferred Manga {} ({}) to {}",
        handle(&me),
        manga.name,
        manga.id,
        handle(&recipient)
    ))
    .with_write(EntityWrite::UpdateManga {
        id: manga.id,
        patch: MangaPatch {
            creator_id: Some(recipient.id),
            ..MangaPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Delete a manga, its chapters, and every stored image they own.
///
/// Requires administrator, or both manage-manga and manage-chapter. Chapter
/// prefixes are wiped concurrently, then the cover prefix, then rows and the
/// audit line land in one batch.
#[tracing::instrument(skip(ctx, actor))]
pub async fn delete_manga(
    ctx: &AdminContext,
    actor: &AdminActor,
    manga_id: MangaId,
) -> TankobonResult<()> {
    let me = require_actor_where(
        ctx,
        actor,
        "ADMINISTRATOR or MANAGE_MANGA and MANAGE_CHAPTER",
        |user| {
            user.permissions.is_administrator()
                || user
                    .permissions
                    .has_every(&[Permission::ManageManga, Permission::ManageChapter])
        },
    )
    .await?;
    let manga = ctx.gateway().manga(manga_id).await?;
    let chapters = ctx.gateway().chapters_of_manga(manga.id).await?;

    future::try_join_all(
        chapters
            .iter()
            .map(|chapter| {
                let prefix = chapter_prefix(manga.id, chapter.id);
                async move { wipe_prefix(ctx.storage(), &prefix).await }
            }),
    )
    .await?;
    wipe_prefix(ctx.storage(), &manga_prefix(manga.id)).await?;

    let batch = AuditedBatch::new(format!(
        "{} deleted Manga {} ({})",
        handle(&me),
        manga.name,
        manga.id
    ))
    .with_write(EntityWrite::DeleteChaptersOfManga { manga_id: manga.id })
    .with_write(EntityWrite::DeleteManga { id: manga.id });
    ctx.gateway().commit(batch).await
}
