//! User account administration: bans, mutes, permissions, badges,
//! two-factor resets, and verification decisions.

use crate::guard::{handle, load_target_user, require_actor};
use crate::AdminContext;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use tankobon_core::{AdminActor, BadgeId, NewNotification, Permission, PermissionSet, UserId};
use tankobon_error::{AdminError, AdminErrorKind, PersistenceError, TankobonResult};
use tankobon_persistence::{AuditedBatch, EntityWrite, UserPatch};

/// Whether to ban or unban an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanAction {
    /// Ban the account
    Ban,
    /// Lift the ban
    Unban,
}

/// Ban or unban an account. Administrator only.
///
/// Banning an already-banned account (or unbanning a non-banned one) is a
/// conflict.
#[tracing::instrument(skip(ctx, actor))]
pub async fn set_ban(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
    action: BanAction,
) -> TankobonResult<()> {
    let me = require_actor(ctx, actor, &[Permission::Administrator]).await?;
    let target = load_target_user(ctx, &me, user_id).await?;

    let banned = match action {
        BanAction::Ban => {
            if target.is_banned {
                Err(AdminError::conflict("user is already banned"))?;
            }
            true
        }
        BanAction::Unban => {
            if !target.is_banned {
                Err(AdminError::conflict("user is not banned"))?;
            }
            false
        }
    };

    let verb = if banned { "banned" } else { "unbanned" };
    let batch = AuditedBatch::new(format!("{} {} user {}", handle(&me), verb, handle(&target)))
        .with_write(EntityWrite::UpdateUser {
            id: target.id,
            patch: UserPatch {
                is_banned: Some(banned),
                ..UserPatch::default()
            },
        });
    ctx.gateway().commit(batch).await
}

/// Mute an account until the given instant.
///
/// The expiry must fall on or after the start of tomorrow (UTC); muting an
/// already-muted account is a conflict.
#[tracing::instrument(skip(ctx, actor))]
pub async fn mute_user(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
    mute_until: DateTime<Utc>,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageUser],
    )
    .await?;

    let now = Utc::now();
    let tomorrow = (now + TimeDelta::days(1))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    if mute_until < tomorrow {
        Err(AdminError::new(AdminErrorKind::Validation(
            "mute must last at least until tomorrow".to_string(),
        )))?;
    }

    let target = load_target_user(ctx, &me, user_id).await?;
    if target.is_muted(now) {
        Err(AdminError::conflict("user is already muted"))?;
    }

    let batch = AuditedBatch::new(format!(
        "{} muted user {} until {}",
        handle(&me),
        handle(&target),
        mute_until.format("%Y-%m-%d")
    ))
    .with_write(EntityWrite::UpdateUser {
        id: target.id,
        patch: UserPatch {
            mute_expires_at: Some(Some(mute_until)),
            ..UserPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Replace an account's permission set. Administrator only.
///
/// Accounts without two-factor enabled cannot hold permissions; granting to
/// one reports not-found rather than revealing the account's state.
#[tracing::instrument(skip(ctx, actor, permissions))]
pub async fn set_permissions(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
    permissions: PermissionSet,
) -> TankobonResult<()> {
    let me = require_actor(ctx, actor, &[Permission::Administrator]).await?;
    let target = ctx.gateway().user(user_id).await?;
    if !target.two_factor_enabled {
        Err(PersistenceError::not_found("user", user_id))?;
    }

    let mut flags: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
    flags.sort();
    let rendered = if flags.is_empty() {
        "none".to_string()
    } else {
        flags.join(", ")
    };

    let batch = AuditedBatch::new(format!(
        "{} set permissions of user {} to {}",
        handle(&me),
        handle(&target),
        rendered
    ))
    .with_write(EntityWrite::UpdateUser {
        id: target.id,
        patch: UserPatch {
            permissions: Some(permissions),
            ..UserPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Replace the badges assigned to an account.
///
/// Every referenced badge must exist.
#[tracing::instrument(skip(ctx, actor, badges), fields(count = badges.len()))]
pub async fn set_badges(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
    badges: Vec<BadgeId>,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageUser],
    )
    .await?;
    let target = load_target_user(ctx, &me, user_id).await?;

    for badge_id in &badges {
        ctx.gateway().badge(*badge_id).await?;
    }

    let batch = AuditedBatch::new(format!(
        "{} changed badges of user {}",
        handle(&me),
        handle(&target)
    ))
    .with_write(EntityWrite::UpdateUser {
        id: target.id,
        patch: UserPatch {
            badges: Some(badges),
            ..UserPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Disable two-factor authentication for an account.
///
/// Disabling it for an account that does not have it enabled is a conflict.
#[tracing::instrument(skip(ctx, actor))]
pub async fn reset_two_factor(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageUser],
    )
    .await?;
    let target = load_target_user(ctx, &me, user_id).await?;
    if !target.two_factor_enabled {
        Err(AdminError::conflict("two-factor is not enabled"))?;
    }

    let batch = AuditedBatch::new(format!(
        "{} reset two-factor for user {}",
        handle(&me),
        handle(&target)
    ))
    .with_write(EntityWrite::UpdateUser {
        id: target.id,
        patch: UserPatch {
            two_factor_enabled: Some(false),
            ..UserPatch::default()
        },
    });
    ctx.gateway().commit(batch).await
}

/// Outcome of a verification review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyDecision {
    /// Grant the verified mark
    Accept,
    /// Decline the request
    Reject,
}

/// Decide a pending verification request.
///
/// Clears the pending flag either way and notifies the account of the
/// outcome in the same batch as the decision.
#[tracing::instrument(skip(ctx, actor))]
pub async fn decide_verification(
    ctx: &AdminContext,
    actor: &AdminActor,
    user_id: &UserId,
    decision: VerifyDecision,
) -> TankobonResult<()> {
    let me = require_actor(
        ctx,
        actor,
        &[Permission::Administrator, Permission::ManageUser],
    )
    .await?;
    let target = ctx.gateway().user(user_id).await?;
    if !target.pending_verification {
        Err(PersistenceError::not_found("verification request", user_id))?;
    }
    if target.verified {
        Err(AdminError::conflict("user is already verified"))?;
    }

    let accepted = matches!(decision, VerifyDecision::Accept);
    let verb = if accepted { "accepted" } else { "rejected" };
    let message = if accepted {
        "Your verification request has been approved."
    } else {
        "Your verification request has been rejected."
    };

    let batch = AuditedBatch::new(format!(
        "{} {} verification for user {}",
        handle(&me),
        verb,
        handle(&target)
    ))
    .with_write(EntityWrite::UpdateUser {
        id: target.id.clone(),
        patch: UserPatch {
            verified: Some(accepted),
            pending_verification: Some(false),
            ..UserPatch::default()
        },
    })
    .with_write(EntityWrite::InsertNotification {
        notification: NewNotification {
            user_id: target.id,
            content: message.to_string(),
        },
    });
    ctx.gateway().commit(batch).await
}
