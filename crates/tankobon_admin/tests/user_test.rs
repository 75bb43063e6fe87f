//! Tests for user account administration.

mod common;

use chrono::{Duration, Utc};
use common::{context, user};
use tankobon_admin::user::{
    decide_verification, mute_user, reset_two_factor, set_badges, set_ban, set_permissions,
};
use tankobon_admin::{BanAction, VerifyDecision};
use tankobon_core::{AdminActor, Badge, Permission, PermissionSet};
use tankobon_error::FailureClass;
use tankobon_persistence::PersistenceGateway;

#[tokio::test]
async fn ban_and_unban_guard_current_state() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("admin", &[Permission::Administrator]));
    gateway.insert_user(user("target", &[]));
    let actor = AdminActor::new("admin");

    set_ban(&ctx, &actor, &"target".to_string(), BanAction::Ban)
        .await
        .unwrap();
    assert!(gateway.user("target").await.unwrap().is_banned);

    let err = set_ban(&ctx, &actor, &"target".to_string(), BanAction::Ban)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Conflict);

    set_ban(&ctx, &actor, &"target".to_string(), BanAction::Unban)
        .await
        .unwrap();
    assert!(!gateway.user("target").await.unwrap().is_banned);
    assert_eq!(gateway.log_count(), 2);
}

#[tokio::test]
async fn ban_requires_administrator() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    gateway.insert_user(user("target", &[]));

    let err = set_ban(
        &ctx,
        &AdminActor::new("mod"),
        &"target".to_string(),
        BanAction::Ban,
    )
    .await
    .unwrap_err();
    assert_eq!(err.class(), FailureClass::Forbidden);
}

#[tokio::test]
async fn admin_targets_are_invisible_to_managers() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    gateway.insert_user(user("boss", &[Permission::Administrator]));

    // A manager probing an administrator account learns nothing beyond 404
    let err = reset_two_factor(&ctx, &AdminActor::new("mod"), &"boss".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::NotFound);
    assert!(gateway.user("boss").await.unwrap().two_factor_enabled);
}

#[tokio::test]
async fn mute_requires_future_expiry_and_unmuted_target() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    gateway.insert_user(user("target", &[]));
    let actor = AdminActor::new("mod");

    let err = mute_user(&ctx, &actor, &"target".to_string(), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Validation);

    let until = Utc::now() + Duration::days(3);
    mute_user(&ctx, &actor, &"target".to_string(), until)
        .await
        .unwrap();
    let target = gateway.user("target").await.unwrap();
    assert!(target.is_muted(Utc::now()));

    let err = mute_user(&ctx, &actor, &"target".to_string(), until)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Conflict);
}

#[tokio::test]
async fn permissions_require_target_two_factor() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("admin", &[Permission::Administrator]));
    let mut target = user("target", &[]);
    target.two_factor_enabled = false;
    gateway.insert_user(target);

    let grant: PermissionSet = [Permission::ManageManga].into_iter().collect();
    let err = set_permissions(&ctx, &AdminActor::new("admin"), &"target".to_string(), grant)
        .await
        .unwrap_err();
    // Masked rather than revealing the two-factor state
    assert_eq!(err.class(), FailureClass::NotFound);
    assert_eq!(gateway.log_count(), 0);
}

#[tokio::test]
async fn permissions_are_replaced_and_audited() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("admin", &[Permission::Administrator]));
    gateway.insert_user(user("target", &[Permission::ManageForum]));

    let grant: PermissionSet = [Permission::ManageManga, Permission::ManageChapter]
        .into_iter()
        .collect();
    set_permissions(
        &ctx,
        &AdminActor::new("admin"),
        &"target".to_string(),
        grant.clone(),
    )
    .await
    .unwrap();

    assert_eq!(gateway.user("target").await.unwrap().permissions, grant);
    let logs = gateway.logs(10, 0).await.unwrap();
    assert!(logs[0].content.contains("MANAGE_CHAPTER, MANAGE_MANGA"));
}

#[tokio::test]
async fn badge_assignment_validates_badges() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    gateway.insert_user(user("target", &[]));
    gateway.insert_badge(Badge {
        id: 1,
        name: "Founder".to_string(),
        description: "Early supporter".to_string(),
        color: "#fff".to_string(),
        icon: None,
    });
    let actor = AdminActor::new("mod");

    let err = set_badges(&ctx, &actor, &"target".to_string(), vec![1, 99])
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::NotFound);
    assert!(gateway.user("target").await.unwrap().badges.is_empty());

    set_badges(&ctx, &actor, &"target".to_string(), vec![1])
        .await
        .unwrap();
    assert_eq!(gateway.user("target").await.unwrap().badges, vec![1]);
}

#[tokio::test]
async fn two_factor_reset_rejects_disabled_target() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    let mut target = user("target", &[]);
    target.two_factor_enabled = false;
    gateway.insert_user(target);

    let err = reset_two_factor(&ctx, &AdminActor::new("mod"), &"target".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Conflict);
}

#[tokio::test]
async fn verification_decision_notifies_in_same_batch() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    let mut target = user("target", &[]);
    target.pending_verification = true;
    gateway.insert_user(target);

    decide_verification(
        &ctx,
        &AdminActor::new("mod"),
        &"target".to_string(),
        VerifyDecision::Accept,
    )
    .await
    .unwrap();

    let target = gateway.user("target").await.unwrap();
    assert!(target.verified);
    assert!(!target.pending_verification);
    let notifications = gateway.notifications_for("target");
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].content.contains("approved"));
    assert_eq!(gateway.log_count(), 1);
}

#[tokio::test]
async fn verification_decision_requires_pending_request() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));
    gateway.insert_user(user("target", &[]));

    let err = decide_verification(
        &ctx,
        &AdminActor::new("mod"),
        &"target".to_string(),
        VerifyDecision::Reject,
    )
    .await
    .unwrap_err();
    assert_eq!(err.class(), FailureClass::NotFound);
    assert!(gateway.notifications_for("target").is_empty());
}
