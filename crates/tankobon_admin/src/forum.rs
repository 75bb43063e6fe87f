//! Sub-forum administration.

use crate::guard::{handle, require_actor};
use crate::AdminContext;
use tankobon_core::{forum_banner_key, forum_prefix, AdminActor, ForumId, ImageSource, Permission};
use tankobon_error::TankobonResult;
use tankobon_persistence::{AuditedBatch, EntityWrite, ForumPatch};
use tankobon_storage::{upload_single, wipe_prefix};

/// A sub-forum edit submission.
#[derive(Debug, Clone)]
pub struct ForumEdit {
    /// New display title
    pub title: String,
    /// New banner: keep a reference or upload fresh bytes (`None` keeps current)
    pub banner: Option<ImageSource>,
}

/// Edit a sub-forum's title and banner.
#[tracing::instrument(skip(ctx, actor, edit))]
pub async fn edit_forum(
    ctx: &AdminContext,
    actor: &AdminActor,
    forum_id: ForumId,
    edit: ForumEdit,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageForum],
    )
    .await?;
    let forum = ctx.gateway().forum(forum_id).await?;

    let banner = match edit.banner {
        Some(ImageSource::New(image)) => {
            Some(upload_single(ctx.storage(), &forum_banner_key(forum.id), image).await?)
        }
        Some(ImageSource::Existing(reference)) => Some(reference),
        None => forum.banner.clone(),
    };

    let batch = AuditedBatch::new(format!(
        "{} edited Forum {} ({})",
        handle(&me),
        edit.title,
        forum.id
    ))
    .with_write(EntityWrite::UpdateForum {
        id: forum.id,
        patch: ForumPatch {
            title: Some(edit.title),
            banner,
        },
    });
    ctx.gateway().commit(batch).await
}

/// Delete a sub-forum and its stored banner.
#[tracing::instrument(skip(ctx, actor))]
pub async fn delete_forum(
    ctx: &AdminContext,
    actor: &AdminActor,
    forum_id: ForumId,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageForum],
    )
    .await?;
    let forum = ctx.gateway().forum(forum_id).await?;

    wipe_prefix(ctx.storage(), &forum_prefix(forum.id)).await?;

    let batch = AuditedBatch::new(format!(
        "{} deleted Forum {} ({})",
        handle(&me),
        forum.title,
        forum.id
    ))
    .with_write(EntityWrite::DeleteForum { id: forum.id });
    ctx.gateway().commit(batch).await
}
