//! Tankobon: admin backend for a manga platform.
//!
//! This facade re-exports the workspace crates so applications depend on one
//! name:
//!
//! - [`core`]: domain entities, permissions, image and key types
//! - [`storage`]: object storage gateway and the chapter image
//!   reconciliation engine
//! - [`persistence`]: persistence gateway with atomic audited write batches
//! - [`admin`]: permission-guarded admin services over both gateways
//! - [`error`]: workspace error taxonomy and [`TankobonResult`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tankobon::admin::AdminContext;
//! use tankobon::persistence::MemoryGateway;
//! use tankobon::storage::MemoryStorage;
//!
//! let ctx = AdminContext::new(Arc::new(MemoryGateway::new()), Arc::new(MemoryStorage::new()));
//! # let _ = ctx;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use tankobon_admin as admin;
pub use tankobon_core as core;
pub use tankobon_error as error;
pub use tankobon_persistence as persistence;
pub use tankobon_storage as storage;

pub use tankobon_error::{TankobonError, TankobonErrorKind, TankobonResult};
