//! Storage key layout.
//!
//! The storage namespace is partitioned per entity so concurrent operations on
//! different entities never touch the same objects:
//!
//! ```text
//! chapter/{manga_id}/{chapter_id}/{page}.webp
//! manga/{manga_id}/cover.webp
//! team/{team_id}/cover.webp
//! badge/{badge_id}/icon.webp
//! forum/{forum_id}/banner.webp
//! ```

use crate::{BadgeId, ChapterId, ForumId, MangaId, TeamId};

/// Prefix for all page images of one chapter.
pub fn chapter_prefix(manga_id: MangaId, chapter_id: ChapterId) -> String {
    format!("chapter/{manga_id}/{chapter_id}")
}

/// Prefix for all objects belonging to one manga (cover only today).
pub fn manga_prefix(manga_id: MangaId) -> String {
    format!("manga/{manga_id}")
}

/// Fixed key for a manga cover.
pub fn manga_cover_key(manga_id: MangaId) -> String {
    format!("manga/{manga_id}/cover.webp")
}

/// Prefix for all objects belonging to one team.
pub fn team_prefix(team_id: TeamId) -> String {
    format!("team/{team_id}")
}

/// Fixed key for a team cover.
pub fn team_cover_key(team_id: TeamId) -> String {
    format!("team/{team_id}/cover.webp")
}

/// Fixed key for a badge icon.
pub fn badge_icon_key(badge_id: BadgeId) -> String {
    format!("badge/{badge_id}/icon.webp")
}

/// Prefix for all objects belonging to one badge.
pub fn badge_prefix(badge_id: BadgeId) -> String {
    format!("badge/{badge_id}")
}

/// Prefix for all objects belonging to one sub-forum.
pub fn forum_prefix(forum_id: ForumId) -> String {
    format!("forum/{forum_id}")
}

/// Fixed key for a sub-forum banner.
pub fn forum_banner_key(forum_id: ForumId) -> String {
    format!("forum/{forum_id}/banner.webp")
}
