//! Integration tests for the image reconciliation engine.

use tankobon_core::{ImageRef, ImageSource, NewImage};
use tankobon_error::FailureClass;
use tankobon_storage::{MemoryStorage, ReconcilePlan, reconcile};

const PREFIX: &str = "chapter/3/7";

fn fresh(filename: &str) -> ImageSource {
    ImageSource::New(NewImage::new(filename, filename.as_bytes().to_vec()))
}

fn keep(reference: &ImageRef) -> ImageSource {
    ImageSource::Existing(reference.clone())
}

#[tokio::test]
async fn applies_desired_order_across_kept_and_fresh() {
    let storage = MemoryStorage::new();
    let a = storage.seed(format!("{PREFIX}/a.webp"), vec![1]);
    let b = storage.seed(format!("{PREFIX}/b.webp"), vec![2]);
    let existing = vec![a.clone(), b.clone()];

    let submitted = vec![keep(&a), fresh("c.png"), keep(&b)];
    let result = reconcile(&storage, PREFIX, &existing, submitted, &[2, 0, 1])
        .await
        .unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result[0], b);
    assert_eq!(result[1], a);
    assert_eq!(result[2].as_str(), format!("{PREFIX}/c.webp"));
    assert!(storage.contains(&format!("{PREFIX}/c.webp")));
    // Kept references are never re-uploaded
    assert_eq!(storage.recorded_puts(), vec![format!("{PREFIX}/c.webp")]);
}

#[tokio::test]
async fn replaces_one_page_and_reorders() {
    let storage = MemoryStorage::new();
    let a = storage.seed(format!("{PREFIX}/a.webp"), vec![1]);
    let b = storage.seed(format!("{PREFIX}/b.webp"), vec![2]);
    let existing = vec![a, b.clone()];

    let result = reconcile(
        &storage,
        PREFIX,
        &existing,
        vec![keep(&b), fresh("c.png")],
        &[1, 0],
    )
    .await
    .unwrap();

    assert_eq!(result[0].as_str(), format!("{PREFIX}/c.webp"));
    assert_eq!(result[1], b);
    assert_eq!(storage.recorded_puts().len(), 1);
    assert_eq!(storage.recorded_deletes(), vec![format!("{PREFIX}/a.webp")]);
}

#[tokio::test]
async fn populates_an_empty_chapter() {
    let storage = MemoryStorage::new();

    let result = reconcile(
        &storage,
        PREFIX,
        &[],
        vec![fresh("x.png"), fresh("y.png")],
        &[0, 1],
    )
    .await
    .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].as_str(), format!("{PREFIX}/x.webp"));
    assert_eq!(result[1].as_str(), format!("{PREFIX}/y.webp"));
    assert_eq!(storage.recorded_puts().len(), 2);
    assert!(storage.recorded_deletes().is_empty());
}

#[tokio::test]
async fn unchanged_submission_touches_nothing() {
    let storage = MemoryStorage::new();
    let a = storage.seed(format!("{PREFIX}/a.webp"), vec![1]);

    let result = reconcile(&storage, PREFIX, &[a.clone()], vec![keep(&a)], &[0])
        .await
        .unwrap();

    assert_eq!(result, vec![a]);
    assert!(storage.recorded_puts().is_empty());
    assert!(storage.recorded_deletes().is_empty());
}

#[tokio::test]
async fn deletes_each_dropped_image_once() {
    let storage = MemoryStorage::new();
    let kept = storage.seed(format!("{PREFIX}/keep.webp"), vec![1]);
    let dropped = storage.seed(format!("{PREFIX}/drop.webp"), vec![2]);
    // The same reference can appear twice in a corrupted list; it still
    // yields one delete
    let existing = vec![kept.clone(), dropped.clone(), dropped.clone()];

    let result = reconcile(&storage, PREFIX, &existing, vec![keep(&kept)], &[0])
        .await
        .unwrap();

    assert_eq!(result, vec![kept]);
    assert_eq!(storage.recorded_deletes(), vec![format!("{PREFIX}/drop.webp")]);
    assert!(!storage.contains(&format!("{PREFIX}/drop.webp")));
    assert!(storage.contains(&format!("{PREFIX}/keep.webp")));
}

#[tokio::test]
async fn same_named_upload_overwrites_in_place() {
    let storage = MemoryStorage::new();
    let old = storage.seed(format!("{PREFIX}/page_01.webp"), vec![1]);
    let existing = vec![old];

    // The replacement is not in the kept set, so the fresh bytes land on the
    // same key and the old object must not be deleted afterwards
    let result = reconcile(&storage, PREFIX, &existing, vec![fresh("page_01.png")], &[0])
        .await
        .unwrap();

    assert_eq!(result[0].as_str(), format!("{PREFIX}/page_01.webp"));
    assert_eq!(storage.recorded_puts(), vec![format!("{PREFIX}/page_01.webp")]);
    assert!(storage.recorded_deletes().is_empty());
    assert_eq!(storage.object_count(), 1);
}

#[tokio::test]
async fn suffixes_collision_with_kept_image() {
    let storage = MemoryStorage::new();
    let kept = storage.seed(format!("{PREFIX}/a.webp"), vec![1]);
    let existing = vec![kept.clone()];

    // `a` is kept, so the fresh `a` cannot overwrite it and gets a suffix
    let result = reconcile(
        &storage,
        PREFIX,
        &existing,
        vec![keep(&kept), fresh("a.png")],
        &[0, 1],
    )
    .await
    .unwrap();

    assert_eq!(result[0], kept);
    assert_eq!(result[1].as_str(), format!("{PREFIX}/a_1.webp"));
    assert!(storage.recorded_deletes().is_empty());
}

#[test]
fn plan_keeps_batch_keys_distinct() {
    let plan = ReconcilePlan::new(
        PREFIX,
        &[],
        vec![fresh("page.png"), fresh("page.jpg"), fresh("page.gif")],
        &[0, 1, 2],
    )
    .unwrap();

    let keys: Vec<_> = plan.uploads().iter().map(|u| u.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "chapter/3/7/page.webp",
            "chapter/3/7/page_1.webp",
            "chapter/3/7/page_2.webp",
        ]
    );
    assert!(plan.deletes().is_empty());
}

#[test]
fn plan_increments_numeric_suffix_of_colliding_stem() {
    let existing = vec![
        ImageRef::new(format!("{PREFIX}/page_04.webp")),
        ImageRef::new(format!("{PREFIX}/page_05.webp")),
    ];

    let plan = ReconcilePlan::new(
        PREFIX,
        &existing,
        vec![
            ImageSource::Existing(existing[0].clone()),
            ImageSource::Existing(existing[1].clone()),
            fresh("page_04.png"),
        ],
        &[0, 1, 2],
    )
    .unwrap();

    assert_eq!(plan.uploads()[0].key, format!("{PREFIX}/page_5.webp"));
}

#[tokio::test]
async fn saturated_numeric_suffix_still_gets_a_distinct_key() {
    let storage = MemoryStorage::new();
    let kept = storage.seed(format!("{PREFIX}/x_18446744073709551615.webp"), vec![1]);
    let existing = vec![kept.clone()];

    // The trailing suffix is already u64::MAX, so numbering restarts on the
    // full stem instead of incrementing
    let result = reconcile(
        &storage,
        PREFIX,
        &existing,
        vec![keep(&kept), fresh("x_18446744073709551615.png")],
        &[0, 1],
    )
    .await
    .unwrap();

    assert_eq!(result[0], kept);
    assert_eq!(
        result[1].as_str(),
        format!("{PREFIX}/x_18446744073709551615_1.webp")
    );
}

#[tokio::test]
async fn malformed_order_fails_before_any_storage_call() {
    let storage = MemoryStorage::new();
    let kept = storage.seed(format!("{PREFIX}/a.webp"), vec![1]);
    let existing = vec![kept.clone()];

    // Wrong length
    let err = reconcile(&storage, PREFIX, &existing, vec![keep(&kept)], &[])
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Validation);

    // Out of range
    let err = reconcile(&storage, PREFIX, &existing, vec![keep(&kept)], &[1])
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Validation);

    // Duplicate index
    let err = reconcile(
        &storage,
        PREFIX,
        &existing,
        vec![keep(&kept), fresh("b.png")],
        &[0, 0],
    )
    .await
    .unwrap_err();
    assert_eq!(err.class(), FailureClass::Validation);

    assert!(storage.recorded_puts().is_empty());
    assert!(storage.recorded_deletes().is_empty());
}

#[tokio::test]
async fn upload_failure_aborts_before_stale_deletes() {
    let storage = MemoryStorage::new();
    let dropped = storage.seed(format!("{PREFIX}/old.webp"), vec![1]);
    let existing = vec![dropped];
    storage.fail_put_containing("broken");

    let err = reconcile(&storage, PREFIX, &existing, vec![fresh("broken.png")], &[0])
        .await
        .unwrap_err();

    assert_eq!(err.class(), FailureClass::Internal);
    // The stale object survives a failed edit
    assert!(storage.recorded_deletes().is_empty());
    assert!(storage.contains(&format!("{PREFIX}/old.webp")));
}

#[tokio::test]
async fn references_carry_public_base() {
    let storage = MemoryStorage::with_public_base("https://img.example.com");

    let result = reconcile(&storage, PREFIX, &[], vec![fresh("p1.png")], &[0])
        .await
        .unwrap();

    assert_eq!(
        result[0].as_str(),
        format!("https://img.example.com/{PREFIX}/p1.webp")
    );
    // The stored key stays base-free
    assert!(storage.contains(&format!("{PREFIX}/p1.webp")));
}
