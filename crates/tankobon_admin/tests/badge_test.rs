//! Tests for badge administration.

mod common;

use common::{context, user};
use tankobon_admin::badge::{create_badge, delete_badge, edit_badge};
use tankobon_admin::{BadgeCreate, BadgeEdit};
use tankobon_core::{AdminActor, NewImage, Permission};
use tankobon_error::FailureClass;
use tankobon_persistence::PersistenceGateway;

fn creation(icon: Option<NewImage>) -> BadgeCreate {
    BadgeCreate {
        name: "Founder".to_string(),
        description: "Early supporter".to_string(),
        color: "#ffaa00".to_string(),
        icon,
    }
}

#[tokio::test]
async fn create_uploads_icon_after_id_is_issued() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageBadge]));

    let badge = create_badge(
        &ctx,
        &AdminActor::new("mod"),
        creation(Some(NewImage::new("icon.png", vec![7]))),
    )
    .await
    .unwrap();

    let key = format!("badge/{}/icon.webp", badge.id);
    assert!(storage.contains(&key));
    assert_eq!(badge.icon.as_ref().unwrap().as_str(), key);
    assert_eq!(gateway.badge(badge.id).await.unwrap().icon, badge.icon);
    assert_eq!(gateway.log_count(), 1);
}

#[tokio::test]
async fn create_without_icon_still_audits() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("admin", &[Permission::Administrator]));

    let badge = create_badge(&ctx, &AdminActor::new("admin"), creation(None))
        .await
        .unwrap();

    assert!(badge.icon.is_none());
    assert_eq!(storage.object_count(), 0);
    assert_eq!(gateway.log_count(), 1);
}

#[tokio::test]
async fn create_requires_badge_permission() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageUser]));

    let err = create_badge(&ctx, &AdminActor::new("mod"), creation(None))
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Forbidden);
}

#[tokio::test]
async fn edit_replaces_display_fields() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageBadge]));
    let badge = create_badge(&ctx, &AdminActor::new("mod"), creation(None))
        .await
        .unwrap();

    edit_badge(
        &ctx,
        &AdminActor::new("mod"),
        badge.id,
        BadgeEdit {
            name: "Veteran".to_string(),
            description: "Long-time supporter".to_string(),
            color: "#00aaff".to_string(),
            icon: None,
        },
    )
    .await
    .unwrap();

    let stored = gateway.badge(badge.id).await.unwrap();
    assert_eq!(stored.name, "Veteran");
    assert_eq!(stored.color, "#00aaff");
}

#[tokio::test]
async fn delete_wipes_icon_and_row() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageBadge]));
    let badge = create_badge(
        &ctx,
        &AdminActor::new("mod"),
        creation(Some(NewImage::new("icon.png", vec![7]))),
    )
    .await
    .unwrap();

    delete_badge(&ctx, &AdminActor::new("mod"), badge.id)
        .await
        .unwrap();

    assert!(!storage.contains(&format!("badge/{}/icon.webp", badge.id)));
    assert_eq!(
        gateway.badge(badge.id).await.unwrap_err().class(),
        FailureClass::NotFound
    );
}
