//! Permission model for admin operations.
//!
//! Authorization throughout the system reduces to simple set predicates over
//! enum flags: an operation requires `ADMINISTRATOR` or some combination of
//! `MANAGE_*` permissions. No hierarchy or inheritance exists.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single permission flag held by a user.
///
/// Serialized in `SCREAMING_SNAKE_CASE` to match the persisted representation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Full access; satisfies every permission check
    Administrator,
    /// Manage manga titles
    ManageManga,
    /// Manage chapters and their images
    ManageChapter,
    /// Manage sub-forums
    ManageForum,
    /// Manage scanlation teams
    ManageTeam,
    /// Manage badges
    ManageBadge,
    /// Manage user accounts (mutes, badges, verification, two-factor)
    ManageUser,
}

/// The set of permission flags held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission flag.
    pub fn insert(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    /// Whether the flag is present.
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Whether this set is the administrator set or contains it.
    pub fn is_administrator(&self) -> bool {
        self.contains(Permission::Administrator)
    }

    /// Whether at least one of the given flags is present.
    pub fn has_some(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.contains(*p))
    }

    /// Whether all of the given flags are present.
    pub fn has_every(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.contains(*p))
    }

    /// Number of flags held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flags are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over held flags in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[Permission]> for PermissionSet {
    fn from(permissions: &[Permission]) -> Self {
        permissions.iter().copied().collect()
    }
}
