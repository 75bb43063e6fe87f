//! Chapter image reconciliation engine.
//!
//! Given the ordered image list currently persisted for a chapter, a newly
//! submitted list (kept references mixed with fresh binaries) and a desired
//! final ordering, the engine computes which objects to upload, which stale
//! objects to delete, and the final ordered reference list, then executes the
//! storage calls.
//!
//! Planning ([`ReconcilePlan::new`]) is pure and fails fast on a malformed
//! order before any storage side effect. Execution ([`reconcile`]) uploads
//! concurrently, treats stale-delete failures as non-fatal (an orphaned object
//! is less harmful than a blocked edit), and never retries; retry policy
//! belongs to the gateway.

use crate::ObjectStorage;
use futures::future;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tankobon_core::{ImageRef, ImageSource};
use tankobon_error::{ReconcileError, ReconcileErrorKind, TankobonError, TankobonResult};

/// One fresh image with its assigned storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    /// Index of the image in the submitted list
    pub index: usize,
    /// Assigned storage key, unique within the entity prefix
    pub key: String,
    /// Encoded image bytes
    pub bytes: Vec<u8>,
}

/// The computed outcome of diffing an existing image list against a submitted
/// one: what to upload, what to delete, and how to reassemble the final order.
#[derive(Debug, Clone)]
pub struct ReconcilePlan {
    kept: BTreeMap<usize, ImageRef>,
    uploads: Vec<PlannedUpload>,
    deletes: Vec<String>,
    order: Vec<usize>,
}

impl ReconcilePlan {
    /// Compute a plan. Pure: no storage calls happen here.
    ///
    /// `existing` is the persisted reference list, `submitted` the caller's
    /// new list, `desired_order` a permutation of `[0, submitted.len())`
    /// giving the final left-to-right order.
    ///
    /// Fresh images are keyed `{prefix}/{stem}.webp`. A fresh image whose stem
    /// matches a still-stored, non-kept existing object overwrites it in place;
    /// any other stem collision (against existing objects or earlier fresh
    /// images in the same batch) gets a `_{n}` suffix incremented until free.
    ///
    /// # Errors
    ///
    /// Returns a [`ReconcileError`] if `desired_order` has the wrong length,
    /// contains an out-of-range index, or repeats an index.
    pub fn new(
        prefix: &str,
        existing: &[ImageRef],
        submitted: Vec<ImageSource>,
        desired_order: &[usize],
    ) -> TankobonResult<Self> {
        validate_order(submitted.len(), desired_order)?;

        let existing_stems: BTreeSet<String> =
            existing.iter().map(|r| r.stem().to_string()).collect();

        let mut kept = BTreeMap::new();
        let mut kept_values = HashSet::new();
        let mut fresh = Vec::new();
        for (index, source) in submitted.into_iter().enumerate() {
            match source {
                ImageSource::Existing(reference) => {
                    kept_values.insert(reference.as_str().to_string());
                    kept.insert(index, reference);
                }
                ImageSource::New(image) => fresh.push((index, image)),
            }
        }
        let kept_stems: BTreeSet<String> =
            kept.values().map(|r| r.stem().to_string()).collect();

        // Assign a collision-free stem to every fresh image
        let mut used = existing_stems.clone();
        let mut overwritten = BTreeSet::new();
        let mut uploads = Vec::with_capacity(fresh.len());
        for (index, image) in fresh {
            let stem = image.stem().to_string();
            let assigned = if existing_stems.contains(&stem)
                && !kept_stems.contains(&stem)
                && !overwritten.contains(&stem)
            {
                // Same-named upload replaces the existing object in place
                overwritten.insert(stem.clone());
                stem
            } else if used.contains(&stem) {
                unique_stem(&stem, &used)
            } else {
                stem
            };
            used.insert(assigned.clone());
            uploads.push(PlannedUpload {
                index,
                key: format!("{prefix}/{assigned}.webp"),
                bytes: image.bytes,
            });
        }

        // Every distinct existing value that is neither kept nor overwritten
        // goes exactly once; duplicates in `existing` collapse
        let mut seen = BTreeSet::new();
        let mut deletes = Vec::new();
        for reference in existing {
            if !seen.insert(reference.as_str()) {
                continue;
            }
            if kept_values.contains(reference.as_str()) {
                continue;
            }
            if overwritten.contains(reference.stem()) {
                continue;
            }
            deletes.push(format!("{prefix}/{}", reference.name()));
        }

        Ok(Self {
            kept,
            uploads,
            deletes,
            order: desired_order.to_vec(),
        })
    }

    /// The planned fresh uploads.
    pub fn uploads(&self) -> &[PlannedUpload] {
        &self.uploads
    }

    /// The stale keys to delete.
    pub fn deletes(&self) -> &[String] {
        &self.deletes
    }

    fn into_parts(
        self,
    ) -> (
        BTreeMap<usize, ImageRef>,
        Vec<PlannedUpload>,
        Vec<String>,
        Vec<usize>,
    ) {
        (self.kept, self.uploads, self.deletes, self.order)
    }
}

/// Execute a reconciliation against a storage gateway.
///
/// Uploads run concurrently; any upload failure fails the whole call before
/// the caller persists anything. Stale deletes run afterwards in one bulk
/// call and are non-fatal: a failure is logged and the final order still
/// returned. The returned list is persisted verbatim by the caller as the
/// chapter's new image set.
#[tracing::instrument(
    skip(storage, existing, submitted, desired_order),
    fields(existing = existing.len(), submitted = submitted.len())
)]
pub async fn reconcile(
    storage: &dyn ObjectStorage,
    prefix: &str,
    existing: &[ImageRef],
    submitted: Vec<ImageSource>,
    desired_order: &[usize],
) -> TankobonResult<Vec<ImageRef>> {
    let plan = ReconcilePlan::new(prefix, existing, submitted, desired_order)?;
    let (kept, uploads, deletes, order) = plan.into_parts();

    let uploaded = future::try_join_all(uploads.into_iter().map(|upload| async move {
        let reference = storage.put(&upload.key, &upload.bytes).await?;
        Ok::<_, TankobonError>((upload.index, reference))
    }))
    .await?;

    if !deletes.is_empty()
        && let Err(error) = storage.delete(&deletes).await
    {
        tracing::warn!(%error, stale = deletes.len(), "failed to delete stale images");
    }

    let mut resolved = kept;
    resolved.extend(uploaded);

    // Every submitted index is either kept or freshly uploaded, so after the
    // order validation above this lookup cannot miss
    Ok(order.into_iter().map(|p| resolved[&p].clone()).collect())
}

fn validate_order(len: usize, order: &[usize]) -> TankobonResult<()> {
    if order.len() != len {
        Err(ReconcileError::new(ReconcileErrorKind::OrderLength {
            expected: len,
            actual: order.len(),
        }))?;
    }
    let mut seen = vec![false; len];
    for &position in order {
        if position >= len {
            Err(ReconcileError::new(ReconcileErrorKind::OrderOutOfRange {
                index: position,
                len,
            }))?;
        }
        if seen[position] {
            Err(ReconcileError::new(ReconcileErrorKind::OrderDuplicate {
                index: position,
            }))?;
        }
        seen[position] = true;
    }
    Ok(())
}

/// Pick a free stem by parsing and incrementing a trailing `_{n}` suffix.
fn unique_stem(stem: &str, used: &BTreeSet<String>) -> String {
    let (mut base, mut n) = match stem.rsplit_once('_') {
        Some((base, digits)) => match digits.parse::<u64>() {
            Ok(n) => (base, n),
            Err(_) => (stem, 0),
        },
        None => (stem, 0),
    };

    loop {
        n = match n.checked_add(1) {
            Some(next) => next,
            // A saturated suffix cannot be incremented; number the full stem
            // from scratch instead
            None => {
                base = stem;
                1
            }
        };
        let candidate = format!("{base}_{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
    }
}
