//! Write batches and entity patches.
//!
//! Patch fields follow one convention: `None` leaves the column unchanged,
//! `Some` sets it. Nullable columns use a nested `Option`, where
//! `Some(None)` clears the value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tankobon_core::{
    BadgeId, ChapterId, ForumId, ImageRef, MangaId, NewNotification, PermissionSet, TeamId, UserId,
};

/// Field updates for a manga row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MangaPatch {
    /// New slug; must stay unique across manga
    pub slug: Option<String>,
    /// New primary title
    pub name: Option<String>,
    /// New alternative title (`Some(None)` clears it)
    pub alt_name: Option<Option<String>>,
    /// New cover reference
    pub cover: Option<ImageRef>,
    /// New owning account
    pub creator_id: Option<UserId>,
    /// New facebook link (`Some(None)` clears it)
    pub facebook_link: Option<Option<String>>,
    /// New discord link (`Some(None)` clears it)
    pub discord_link: Option<Option<String>>,
}

/// Field updates for a chapter row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterPatch {
    /// New position within the manga
    pub index: Option<f64>,
    /// New title
    pub name: Option<String>,
    /// New volume number
    pub volume: Option<i32>,
    /// Replacement image reference list
    pub images: Option<Vec<ImageRef>>,
    /// New visibility state
    pub is_published: Option<bool>,
}

/// Field updates for a sub-forum row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumPatch {
    /// New display title
    pub title: Option<String>,
    /// New banner reference
    pub banner: Option<ImageRef>,
}

/// Field updates for a team row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPatch {
    /// New team name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New cover reference
    pub cover: Option<ImageRef>,
    /// New owning account
    pub owner_id: Option<UserId>,
}

/// Field updates for a badge row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgePatch {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New display color
    pub color: Option<String>,
    /// New icon reference
    pub icon: Option<ImageRef>,
}

/// Field updates for a user row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    /// Replacement permission set
    pub permissions: Option<PermissionSet>,
    /// New two-factor state (disabling also discards the secret downstream)
    pub two_factor_enabled: Option<bool>,
    /// New ban state
    pub is_banned: Option<bool>,
    /// New mute expiry (`Some(None)` lifts the mute)
    pub mute_expires_at: Option<Option<DateTime<Utc>>>,
    /// New verification state
    pub verified: Option<bool>,
    /// New pending-verification state
    pub pending_verification: Option<bool>,
    /// Replacement badge assignment
    pub badges: Option<Vec<BadgeId>>,
}

/// One write against a persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityWrite {
    /// Patch a manga row
    UpdateManga {
        /// Target manga
        id: MangaId,
        /// Fields to change
        patch: MangaPatch,
    },
    /// Delete a manga row
    DeleteManga {
        /// Target manga
        id: MangaId,
    },
    /// Patch a chapter row
    UpdateChapter {
        /// Target chapter
        id: ChapterId,
        /// Fields to change
        patch: ChapterPatch,
    },
    /// Delete a chapter row
    DeleteChapter {
        /// Target chapter
        id: ChapterId,
    },
    /// Delete every chapter of a manga (cascade for manga deletion)
    DeleteChaptersOfManga {
        /// Owning manga
        manga_id: MangaId,
    },
    /// Patch a sub-forum row
    UpdateForum {
        /// Target forum
        id: ForumId,
        /// Fields to change
        patch: ForumPatch,
    },
    /// Delete a sub-forum row
    DeleteForum {
        /// Target forum
        id: ForumId,
    },
    /// Patch a team row
    UpdateTeam {
        /// Target team
        id: TeamId,
        /// Fields to change
        patch: TeamPatch,
    },
    /// Delete a team row
    DeleteTeam {
        /// Target team
        id: TeamId,
    },
    /// Patch a badge row
    UpdateBadge {
        /// Target badge
        id: BadgeId,
        /// Fields to change
        patch: BadgePatch,
    },
    /// Delete a badge row
    DeleteBadge {
        /// Target badge
        id: BadgeId,
    },
    /// Patch a user row
    UpdateUser {
        /// Target user
        id: UserId,
        /// Fields to change
        patch: UserPatch,
    },
    /// Insert a notification row
    InsertNotification {
        /// Notification to deliver
        notification: NewNotification,
    },
}

/// A batch of entity writes paired with exactly one audit log line.
///
/// [`crate::PersistenceGateway::commit`] applies the whole batch atomically:
/// either every write and the log entry land, or none do. A batch with no
/// writes still appends its log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditedBatch {
    /// Entity writes to apply
    pub writes: Vec<EntityWrite>,
    /// Audit line describing the operation
    pub log: String,
}

impl AuditedBatch {
    /// Start a batch with its audit line.
    pub fn new(log: impl Into<String>) -> Self {
        Self {
            writes: Vec::new(),
            log: log.into(),
        }
    }

    /// Append a write.
    pub fn with_write(mut self, write: EntityWrite) -> Self {
        self.writes.push(write);
        self
    }
}
