//! Persistence gateway trait definition.

use crate::AuditedBatch;
use tankobon_core::{
    Badge, BadgeId, Chapter, ChapterId, ForumId, LogEntry, Manga, MangaId, NewBadge, SubForum,
    Team, TeamId, User,
};
use tankobon_error::TankobonResult;

/// Trait for the relational store behind the admin services.
///
/// Read methods resolve an entity by id or fail with a not-found persistence
/// error, mirroring a `find-or-throw` lookup. All mutation flows through
/// [`PersistenceGateway::commit`], except badge creation, which must issue an
/// id before the icon upload can compute its storage key.
#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load a user by id.
    async fn user(&self, id: &str) -> TankobonResult<User>;

    /// Load a manga by id.
    async fn manga(&self, id: MangaId) -> TankobonResult<Manga>;

    /// Load a chapter by id.
    async fn chapter(&self, id: ChapterId) -> TankobonResult<Chapter>;

    /// Load every chapter of a manga. Unknown manga yields an empty list.
    async fn chapters_of_manga(&self, manga_id: MangaId) -> TankobonResult<Vec<Chapter>>;

    /// Load a sub-forum by id.
    async fn forum(&self, id: ForumId) -> TankobonResult<SubForum>;

    /// Load a team by id.
    async fn team(&self, id: TeamId) -> TankobonResult<Team>;

    /// Load a badge by id.
    async fn badge(&self, id: BadgeId) -> TankobonResult<Badge>;

    /// List audit log entries, newest first.
    async fn logs(&self, limit: usize, offset: usize) -> TankobonResult<Vec<LogEntry>>;

    /// Insert a badge row and return it with its issued id.
    ///
    /// Not audited by itself; the creating service follows up with an audited
    /// batch once the icon reference is known.
    async fn create_badge(&self, badge: NewBadge) -> TankobonResult<Badge>;

    /// Apply a write batch and its audit line atomically.
    ///
    /// Either every write and the log entry land, or none do.
    async fn commit(&self, batch: AuditedBatch) -> TankobonResult<()>;
}
