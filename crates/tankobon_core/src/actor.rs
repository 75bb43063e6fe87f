//! The authenticated acting user.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// Identity of the session user invoking an admin operation.
///
/// Session resolution happens outside this workspace; services receive the
/// already-authenticated id and re-load the account to evaluate permissions
/// and guards against current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminActor {
    /// Id of the acting user
    pub user_id: UserId,
}

impl AdminActor {
    /// Wrap a session user id.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
