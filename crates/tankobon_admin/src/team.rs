//! Scanlation team administration.

use crate::guard::{handle, require_actor, require_actor_where};
use crate::AdminContext;
use tankobon_core::{
    team_cover_key, team_prefix, AdminActor, ImageSource, Permission, TeamId, UserId,
};
use tankobon_error::TankobonResult;
use tankobon_persistence::{AuditedBatch, EntityWrite, TeamPatch};
use tankobon_storage::{upload_single, wipe_prefix};

/// A team edit submission.
#[derive(Debug, Clone)]
pub struct TeamEdit {
    /// New team name
    pub name: String,
    /// New description
    pub description: String,
    /// New cover: keep a reference or upload fresh bytes (`None` keeps current)
    pub cover: Option<ImageSource>,
}

/// Edit a team's name, description and cover.
#[tracing::instrument(skip(ctx, actor, edit))]
pub async fn edit_team(
    ctx: &AdminContext,
    actor: &AdminActor,
    team_id: TeamId,
    edit: TeamEdit,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageTeam],
    )
    .await?;
    let team = ctx.gateway().team(team_id).await?;

    let cover = match edit.cover {
        Some(ImageSource::New(image)) => {
            Some(upload_single(ctx.storage(), &team_cover_key(team.id), image).await?)
        }
        Some(ImageSource::Existing(reference)) => Some(reference),
        None => team.cover.clone(),
    };

    let batch = AuditedBatch::new(format!(
        "{} edited Team {} ({})",
        handle(&me),
        edit.name,
        team.id
    ))
    .with_write(EntityWrite::UpdateTeam {
        id: team.id,
        patch: TeamPatch {
            name: Some(edit.name),
            description: Some(edit.description),
            cover,
            owner_id: None,
        },
    });
    ctx.gateway().commit(batch).await
}

/// Transfer a team to a different owning account.
///
/// Requires administrator, or both manage-team and manage-user.
#[tracing::instrument(skip(ctx, actor))]
pub async fn transfer_team_owner(
    ctx: &AdminContext,
    actor: &AdminActor,
    team_id: TeamId,
    new_owner: &UserId,
) -> TankobonResult<()> {
    let me = require_actor_where(
        ctx,
        actor,
        "ADMINISTRATOR or MANAGE_TEAM and MANAGE_USER",
        |user| {
            user.permissions.is_administrator()
                || user
                    .permissions
                    .has_every(&[Permission::ManageTeam, Permission::ManageUser])
        },
    )
    .await?;
    let team = ctx.gateway().team(team_id).await?;
    let recipient = ctx.gateway().user(new_owner).await?;

    let batch = AuditedBatch::new(format!(
        "{} transferred Team {} ({}) to {}",
        handle(&me),
        team.name,
        team.id,
        handle(&recipient)
    ))
    .with_write(EntityWrite::UpdateTeam {
        id: team.id,
        patch: TeamPatch {
            owner_id: Some(recipient.id),
            ..TeamPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Delete a team and its stored cover.
#[tracing::instrument(skip(ctx, actor))]
pub async fn delete_team(
    ctx: &AdminContext,
    actor: &AdminActor,
    team_id: TeamId,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageTeam],
    )
    .await?;
    let team = ctx.gateway().team(team_id).await?;

    wipe_prefix(ctx.storage(), &team_prefix(team.id)).await?;

    let batch = AuditedBatch::new(format!(
        "{} deleted Team {} ({})",
        handle(&me),
        team.name,
        team.id
    ))
    .with_write(EntityWrite::DeleteTeam { id: team.id });
    ctx.gateway().commit(batch).await
}
