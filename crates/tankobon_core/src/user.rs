//! User accounts as seen by the admin dashboard.

use crate::{BadgeId, PermissionSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier (opaque string issued by the auth layer).
pub type UserId = String;

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Permission flags held
    pub permissions: PermissionSet,
    /// Whether two-factor authentication is enabled
    pub two_factor_enabled: bool,
    /// Whether the account is banned
    pub is_banned: bool,
    /// Active mute expiry, if any; an expired value means not muted
    pub mute_expires_at: Option<DateTime<Utc>>,
    /// Whether the account passed identity verification
    pub verified: bool,
    /// Whether a verification request is waiting for a decision
    pub pending_verification: bool,
    /// Badges assigned to the account
    pub badges: Vec<BadgeId>,
}

impl User {
    /// Whether the user is muted at the given instant.
    pub fn is_muted(&self, now: DateTime<Utc>) -> bool {
        self.mute_expires_at.is_some_and(|expires| expires >= now)
    }
}
