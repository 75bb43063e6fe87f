//! Actor and target guards shared by every service.
//!
//! Each operation starts by re-loading the acting account and checking, in
//! order: the account exists, is not banned, has two-factor enabled, and holds
//! the required permissions. Evaluating against current persisted state means
//! a permission revoked mid-session takes effect on the next call.

use crate::AdminContext;
use tankobon_core::{AdminActor, Permission, User, UserId};
use tankobon_error::{AdminError, AdminErrorKind, PersistenceError, TankobonResult};

/// Load the acting user and verify an arbitrary permission predicate.
///
/// `requirement` names the predicate in the rejection message.
pub(crate) async fn require_actor_where<F>(
    ctx: &AdminContext,
    actor: &AdminActor,
    requirement: &str,
    check: F,
) -> TankobonResult<User>
where
    F: FnOnce(&User) -> bool,
{
    let user = ctx.gateway().user(&actor.user_id).await?;
    if user.is_banned {
        Err(AdminError::new(AdminErrorKind::Forbidden(
            "account is banned".to_string(),
        )))?;
    }
    if !user.two_factor_enabled {
        Err(AdminError::new(AdminErrorKind::TwoFactorRequired))?;
    }
    if !check(&user) {
        tracing::debug!(actor = %user.id, requirement, "Permission check failed");
        Err(AdminError::new(AdminErrorKind::Forbidden(format!(
            "requires {requirement}"
        ))))?;
    }
    Ok(user)
}

/// Load the acting user and require at least one of the given permissions.
pub(crate) async fn require_actor(
    ctx: &AdminContext,
    actor: &AdminActor,
    any_of: &[Permission],
) -> TankobonResult<User> {
    let requirement = any_of
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    require_actor_where(ctx, actor, &requirement, |user| {
        user.permissions.has_some(any_of)
    })
    .await
}

/// Load a user targeted by an admin operation.
///
/// Administrator accounts are invisible to non-administrator actors: the
/// lookup reports not-found rather than confirming the account exists.
pub(crate) async fn load_target_user(
    ctx: &AdminContext,
    acting: &User,
    id: &UserId,
) -> TankobonResult<User> {
    let target = ctx.gateway().user(id).await?;
    if target.permissions.is_administrator() && !acting.permissions.is_administrator() {
        Err(PersistenceError::not_found("user", id))?;
    }
    Ok(target)
}

/// `"{name} ({id})"`, the form every audit line uses to name an account.
pub(crate) fn handle(user: &User) -> String {
    format!("{} ({})", user.name, user.id)
}
