//! Badge administration.
//!
//! Badge creation is the one flow that cannot ride a single batch: the icon's
//! storage key embeds the badge id, so the row is inserted first, the icon
//! uploaded, and the reference then attached in the audited batch.

use crate::guard::{handle, require_actor};
use crate::AdminContext;
use tankobon_core::{
    badge_icon_key, badge_prefix, AdminActor, Badge, BadgeId, ImageSource, NewBadge, NewImage,
    Permission,
};
use tankobon_error::TankobonResult;
use tankobon_persistence::{AuditedBatch, BadgePatch, EntityWrite};
use tankobon_storage::{upload_single, wipe_prefix};

/// Fields for a new badge.
#[derive(Debug, Clone)]
pub struct BadgeCreate {
    /// Display name
    pub name: String,
    /// Short description shown on hover
    pub description: String,
    /// Display color (CSS value)
    pub color: String,
    /// Icon bytes, if supplied at creation
    pub icon: Option<NewImage>,
}

/// Create a badge, uploading its icon once an id has been issued.
#[tracing::instrument(skip(ctx, actor, create), fields(name = %create.name))]
pub async fn create_badge(
    ctx: &AdminContext,
    actor: &AdminActor,
    create: BadgeCreate,
) -> TankobonResult<Badge> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageBadge],
    )
    .await?;

    let mut badge = ctx
        .gateway()
        .create_badge(NewBadge {
            name: create.name,
            description: create.description,
            color: create.color,
        })
        .await?;

    let mut batch = AuditedBatch::new(format!(
        "{} created Badge {} ({})",
        handle(&me),
        badge.name,
        badge.id
    ));
    if let Some(icon) = create.icon {
        let reference = upload_single(ctx.storage(), &badge_icon_key(badge.id), icon).await?;
        badge.icon = Some(reference.clone());
        batch = batch.with_write(EntityWrite::UpdateBadge {
            id: badge.id,
            patch: BadgePatch {
                icon: Some(reference),
                ..BadgePatch::default()
            },
        });
    }
    ctx.gateway().commit(batch).await?;

    Ok(badge)
}

/// A badge edit submission.
#[derive(Debug, Clone)]
pub struct BadgeEdit {
    /// New display name
    pub name: String,
    /// New description
    pub description: String,
    /// New display color
    pub color: String,
    /// New icon: keep a reference or upload fresh bytes (`None` keeps current)
    pub icon: Option<ImageSource>,
}

/// Edit a badge's display fields and icon.
#[tracing::instrument(skip(ctx, actor, edit))]
pub async fn edit_badge(
    ctx: &AdminContext,
    actor: &AdminActor,
    badge_id: BadgeId,
    edit: BadgeEdit,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageBadge],
    )
    .await?;
    let badge = ctx.gateway().badge(badge_id).await?;

    let icon = match edit.icon {
        Some(ImageSource::New(image)) => {
            Some(upload_single(ctx.storage(), &badge_icon_key(badge.id), image).await?)
        }
        Some(ImageSource::Existing(reference)) => Some(reference),
        None => badge.icon.clone(),
    };

    let batch = AuditedBatch::new(format!(
        "{} edited Badge {} ({})",
        handle(&me),
        edit.name,
        badge.id
    ))
    .with_write(EntityWrite::UpdateBadge {
        id: badge.id,
        patch: BadgePatch {
            name: Some(edit.name),
            description: Some(edit.description),
            color: Some(edit.color),
            icon,
        },
    });
    ctx.gateway().commit(batch).await
}

/// Delete a badge and its stored icon.
#[tracing::instrument(skip(ctx, actor))]
pub async fn delete_badge(
    ctx: &AdminContext,
    actor: &AdminActor,
    badge_id: BadgeId,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageBadge],
    )
    .await?;
    let badge = ctx.gateway().badge(badge_id).await?;

    wipe_prefix(ctx.storage(), &badge_prefix(badge.id)).await?;

    let batch = AuditedBatch::new(format!(
        "{} deleted Badge {} ({})",
        handle(&me),
        badge.name,
        badge.id
    ))
    .with_write(EntityWrite::DeleteBadge { id: badge.id });
    ctx.gateway().commit(batch).await
}
