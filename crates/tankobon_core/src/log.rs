//! Audit log and notification rows.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only audit log entry.
///
/// Content is a single human-readable line of the form
/// `"{actor} ({actor_id}) <action> {entity} ({entity_id})"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Rendered audit line
    pub content: String,
    /// When the entry was appended
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Create a new entry stamped with the current time.
    pub fn now(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A system notification delivered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification identifier
    pub id: Uuid,
    /// Recipient
    pub user_id: UserId,
    /// Message body
    pub content: String,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

/// Notification fields before persistence assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient
    pub user_id: UserId,
    /// Message body
    pub content: String,
}
