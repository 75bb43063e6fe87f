//! End-to-end tests for chapter administration.

mod common;

use common::{chapter, context, manga, user};
use tankobon_admin::chapter::{delete_chapter, edit_chapter, set_chapter_published};
use tankobon_admin::ChapterEdit;
use tankobon_core::{AdminActor, ImageSource, NewImage, Permission};
use tankobon_error::FailureClass;
use tankobon_persistence::PersistenceGateway;

#[tokio::test]
async fn edit_reconciles_images_and_persists_atomically() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageChapter]));
    gateway.insert_manga(manga(1, "creator"));
    let mut ch = chapter(10, 1);
    let kept = storage.seed("chapter/1/10/p1.webp", vec![1]);
    let stale = storage.seed("chapter/1/10/p2.webp", vec![2]);
    ch.images = vec![kept.clone(), stale.clone()];
    gateway.insert_chapter(ch);

    let edit = ChapterEdit {
        index: 10.5,
        name: "Renamed".to_string(),
        volume: 2,
        images: vec![
            ImageSource::Existing(kept.clone()),
            ImageSource::New(NewImage::new("p3.png", vec![3])),
        ],
        order: vec![1, 0],
    };
    let images = edit_chapter(&ctx, &AdminActor::new("mod"), 10, edit)
        .await
        .unwrap();

    // Fresh page first per the desired order, stale page gone
    assert_eq!(images[0].as_str(), "chapter/1/10/p3.webp");
    assert_eq!(images[1], kept);
    assert!(!storage.contains("chapter/1/10/p2.webp"));

    let stored = gateway.chapter(10).await.unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.index, 10.5);
    assert_eq!(stored.volume, 2);
    assert_eq!(stored.images, images);
    assert_eq!(gateway.log_count(), 1);
}

#[tokio::test]
async fn malformed_order_has_zero_side_effects() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageChapter]));
    gateway.insert_manga(manga(1, "creator"));
    let mut ch = chapter(10, 1);
    let kept = storage.seed("chapter/1/10/p1.webp", vec![1]);
    ch.images = vec![kept.clone()];
    gateway.insert_chapter(ch.clone());

    let edit = ChapterEdit {
        index: 11.0,
        name: "Renamed".to_string(),
        volume: 2,
        images: vec![
            ImageSource::Existing(kept),
            ImageSource::New(NewImage::new("p2.png", vec![2])),
        ],
        order: vec![0, 2],
    };
    let err = edit_chapter(&ctx, &AdminActor::new("mod"), 10, edit)
        .await
        .unwrap_err();

    assert_eq!(err.class(), FailureClass::Validation);
    assert!(storage.recorded_puts().is_empty());
    assert!(storage.recorded_deletes().is_empty());
    assert_eq!(gateway.chapter(10).await.unwrap(), ch);
    assert_eq!(gateway.log_count(), 0);
}

#[tokio::test]
async fn edit_requires_chapter_permission() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("forum-mod", &[Permission::ManageForum]));
    gateway.insert_manga(manga(1, "creator"));
    gateway.insert_chapter(chapter(10, 1));

    let edit = ChapterEdit {
        index: 10.0,
        name: "x".to_string(),
        volume: 1,
        images: Vec::new(),
        order: Vec::new(),
    };
    let err = edit_chapter(&ctx, &AdminActor::new("forum-mod"), 10, edit)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Forbidden);
}

#[tokio::test]
async fn edit_requires_two_factor() {
    let (ctx, gateway, _storage) = context();
    let mut actor = user("mod", &[Permission::Administrator]);
    actor.two_factor_enabled = false;
    gateway.insert_user(actor);

    let edit = ChapterEdit {
        index: 10.0,
        name: "x".to_string(),
        volume: 1,
        images: Vec::new(),
        order: Vec::new(),
    };
    let err = edit_chapter(&ctx, &AdminActor::new("mod"), 10, edit)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Forbidden);
    assert_eq!(gateway.log_count(), 0);
}

#[tokio::test]
async fn publish_toggle_rejects_same_state() {
    let (ctx, gateway, _storage) = context();
    gateway.insert_user(user("mod", &[Permission::ManageChapter]));
    gateway.insert_manga(manga(1, "creator"));
    gateway.insert_chapter(chapter(10, 1));

    set_chapter_published(&ctx, &AdminActor::new("mod"), 10, true)
        .await
        .unwrap();
    assert!(gateway.chapter(10).await.unwrap().is_published);

    let err = set_chapter_published(&ctx, &AdminActor::new("mod"), 10, true)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Conflict);
    assert_eq!(gateway.log_count(), 1);
}

#[tokio::test]
async fn delete_wipes_storage_prefix_and_row() {
    let (ctx, gateway, storage) = context();
    gateway.insert_user(user("admin", &[Permission::Administrator]));
    gateway.insert_manga(manga(1, "creator"));
    let mut ch = chapter(10, 1);
    ch.images = vec![
        storage.seed("chapter/1/10/p1.webp", vec![1]),
        storage.seed("chapter/1/10/p2.webp", vec![2]),
    ];
    gateway.insert_chapter(ch);
    let other = storage.seed("chapter/1/11/p1.webp", vec![3]);

    delete_chapter(&ctx, &AdminActor::new("admin"), 10)
        .await
        .unwrap();

    assert!(!storage.contains("chapter/1/10/p1.webp"));
    assert!(!storage.contains("chapter/1/10/p2.webp"));
    assert!(storage.contains(other.as_str()));
    let err = gateway.chapter(10).await.unwrap_err();
    assert_eq!(err.class(), FailureClass::NotFound);
    assert_eq!(gateway.log_count(), 1);
}
