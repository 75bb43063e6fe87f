//! Community sub-forums.

use crate::{ImageRef, UserId};
use serde::{Deserialize, Serialize};

/// Sub-forum identifier.
pub type ForumId = i64;

/// A community sub-forum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubForum {
    /// Stable identifier
    pub id: ForumId,
    /// URL slug
    pub slug: String,
    /// Display title
    pub title: String,
    /// Banner image reference
    pub banner: Option<ImageRef>,
    /// Account that created the forum
    pub creator_id: UserId,
}
