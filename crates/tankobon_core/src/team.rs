//! Scanlation teams.

use crate::{ImageRef, UserId};
use serde::{Deserialize, Serialize};

/// Team identifier.
pub type TeamId = i64;

/// A scanlation team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier
    pub id: TeamId,
    /// Team name
    pub name: String,
    /// Short description
    pub description: String,
    /// Cover image reference
    pub cover: Option<ImageRef>,
    /// Account that owns the team
    pub owner_id: UserId,
}
