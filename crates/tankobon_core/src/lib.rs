//! Core domain types for the Tankobon admin backend.
//!
//! This crate defines the entities managed by the administrative dashboard
//! (manga, chapters, forums, teams, badges, users, audit log entries), the
//! permission model used to gate every operation, and the image/key types
//! shared between the storage gateway and the admin services.
//!
//! Nothing in here performs I/O; gateways live in `tankobon_storage` and
//! `tankobon_persistence`, services in `tankobon_admin`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actor;
mod badge;
mod chapter;
mod forum;
mod image;
mod key;
mod log;
mod manga;
mod permission;
mod team;
mod telemetry;
mod user;

pub use actor::AdminActor;
pub use badge::{Badge, BadgeId, NewBadge};
pub use chapter::{Chapter, ChapterId};
pub use forum::{ForumId, SubForum};
pub use image::{ImageRef, ImageSource, NewImage};
pub use key::{
    badge_icon_key, badge_prefix, chapter_prefix, forum_banner_key, forum_prefix, manga_cover_key,
    manga_prefix, team_cover_key, team_prefix,
};
pub use log::{LogEntry, NewNotification, Notification};
pub use manga::{Manga, MangaId};
pub use permission::{Permission, PermissionSet};
pub use team::{Team, TeamId};
pub use telemetry::init_tracing;
pub use user::{User, UserId};
