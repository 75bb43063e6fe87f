//! Admin services for the Tankobon manga platform.
//!
//! Each module groups the operations for one entity family. Every operation
//! takes an [`AdminContext`] and an [`tankobon_core::AdminActor`], re-loads
//! the acting account, enforces its permission guard, performs storage work
//! through `tankobon_storage`, and lands all row changes plus one audit line
//! in a single atomic batch through `tankobon_persistence`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod badge;
pub mod chapter;
mod context;
pub mod forum;
mod guard;
pub mod log;
pub mod manga;
pub mod team;
pub mod user;

pub use badge::{BadgeCreate, BadgeEdit};
pub use chapter::ChapterEdit;
pub use context::AdminContext;
pub use forum::ForumEdit;
pub use log::LogPage;
pub use manga::MangaEdit;
pub use tankobon_error::{AdminError, AdminErrorKind};
pub use team::TeamEdit;
pub use user::{BanAction, VerifyDecision};
