//! Object storage gateway and image reconciliation for Tankobon.
//!
//! This crate provides the storage side of the admin backend:
//!
//! - [`ObjectStorage`]: pluggable async gateway over key-addressed image
//!   objects (put / bulk delete / list-by-prefix)
//! - [`FileSystemStorage`]: directory-backed implementation with atomic writes
//! - [`MemoryStorage`]: in-process implementation for tests and local runs
//! - [`ReconcilePlan`] / [`reconcile`]: the chapter image reconciliation
//!   engine, computing upload/delete/reorder operations from an old and new
//!   image list
//! - [`upload_single`] / [`wipe_prefix`]: helpers for fixed-key cover images
//!   and entity deletion
//!
//! # Example
//!
//! ```rust
//! use tankobon_core::{ImageRef, ImageSource, NewImage};
//! use tankobon_storage::{MemoryStorage, reconcile};
//!
//! # async fn example() -> tankobon_error::TankobonResult<()> {
//! let storage = MemoryStorage::new();
//! let existing: Vec<ImageRef> = vec![];
//! let submitted = vec![ImageSource::New(NewImage::new("p1.png", vec![1, 2, 3]))];
//!
//! let final_order = reconcile(&storage, "chapter/1/1", &existing, submitted, &[0]).await?;
//! assert_eq!(final_order.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod filesystem;
mod memory;
mod ops;
mod reconcile;
mod storage;

pub use config::StorageConfig;
pub use filesystem::FileSystemStorage;
pub use memory::MemoryStorage;
pub use ops::{upload_single, wipe_prefix};
pub use reconcile::{PlannedUpload, ReconcilePlan, reconcile};
pub use storage::ObjectStorage;
pub use tankobon_error::{StorageError, StorageErrorKind};
