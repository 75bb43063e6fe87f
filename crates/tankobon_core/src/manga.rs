//! Manga titles.

use crate::{ImageRef, UserId};
use serde::{Deserialize, Serialize};

/// Manga identifier.
pub type MangaId = i64;

/// A manga title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    /// Stable identifier
    pub id: MangaId,
    /// URL slug, unique across all manga
    pub slug: String,
    /// Primary title
    pub name: String,
    /// Alternative title, if any
    pub alt_name: Option<String>,
    /// Cover image reference
    pub cover: Option<ImageRef>,
    /// Account that owns the title
    pub creator_id: UserId,
    /// External community links
    pub facebook_link: Option<String>,
    /// External community links
    pub discord_link: Option<String>,
}
