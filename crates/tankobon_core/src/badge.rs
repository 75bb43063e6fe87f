//! User badges.

use crate::ImageRef;
use serde::{Deserialize, Serialize};

/// Badge identifier.
pub type BadgeId = i64;

/// A badge that can be assigned to user accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable identifier
    pub id: BadgeId,
    /// Display name
    pub name: String,
    /// Short description shown on hover
    pub description: String,
    /// Display color (CSS value)
    pub color: String,
    /// Icon image reference
    pub icon: Option<ImageRef>,
}

/// Badge fields at creation time, before an id has been issued.
///
/// The icon is uploaded after the row exists (its storage key embeds the id),
/// so a new badge always starts without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBadge {
    /// Display name
    pub name: String,
    /// Short description shown on hover
    pub description: String,
    /// Display color (CSS value)
    pub color: String,
}
