//! Error types for the Tankobon admin backend.
//!
//! This crate provides the foundation error types used throughout the Tankobon
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error folds into the top-level [`TankobonError`], which also exposes a
//! [`FailureClass`] so route-level callers can map failures onto the
//! validation / not-found / conflict / forbidden / internal response tiers
//! without string matching.
//!
//! # Examples
//!
//! ```
//! use tankobon_error::{TankobonResult, StorageError, StorageErrorKind};
//!
//! fn upload() -> TankobonResult<()> {
//!     Err(StorageError::new(StorageErrorKind::Upload("connection reset".to_string())))?
//! }
//!
//! assert!(upload().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod admin;
mod config;
mod error;
mod persistence;
mod reconcile;
mod storage;

pub use admin::{AdminError, AdminErrorKind};
pub use config::ConfigError;
pub use error::{FailureClass, TankobonError, TankobonErrorKind, TankobonResult};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use reconcile::{ReconcileError, ReconcileErrorKind};
pub use storage::{StorageError, StorageErrorKind};
