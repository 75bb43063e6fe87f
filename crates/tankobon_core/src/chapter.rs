//! Manga chapters and their image sets.

use crate::{ImageRef, MangaId};
use serde::{Deserialize, Serialize};

/// Chapter identifier.
pub type ChapterId = i64;

/// A chapter of a manga.
///
/// `images` is the durable ordered reference list produced by the
/// reconciliation engine; it starts empty at creation and is fully replaced on
/// each edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable identifier
    pub id: ChapterId,
    /// Owning manga
    pub manga_id: MangaId,
    /// Position within the manga (fractional indices allow insertions)
    pub index: f64,
    /// Chapter title
    pub name: String,
    /// Volume number
    pub volume: i32,
    /// Ordered page image references
    pub images: Vec<ImageRef>,
    /// Whether the chapter is visible to readers
    pub is_published: bool,
}
