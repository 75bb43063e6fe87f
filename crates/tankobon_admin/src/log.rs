//! Audit log listing.

use crate::guard::require_actor;
use crate::AdminContext;
use tankobon_core::{AdminActor, LogEntry, Permission};
use tankobon_error::TankobonResult;

/// A page of the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPage {
    /// Maximum entries to return
    pub limit: usize,
    /// Entries to skip from the newest
    pub offset: usize,
}

impl Default for LogPage {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// List audit log entries, newest first. Administrator only.
#[tracing::instrument(skip(ctx, actor))]
pub async fn list_logs(
    ctx: &AdminContext,
    actor: &AdminActor,
    page: LogPage,
) -> TankobonResult<Vec<LogEntry>> {
    require_actor(ctx, actor, &[Permission::Administrator]).await?;
    ctx.gateway().logs(page.limit, page.offset).await
}
