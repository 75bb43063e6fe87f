//! In-memory persistence gateway.
//!
//! Reference implementation of [`PersistenceGateway`] used by tests and local
//! development. Commits are two-phase under one write lock: every write is
//! validated against current state first, then the whole batch and its log
//! line are applied, so a failing batch leaves no trace.

use crate::{
    AuditedBatch, BadgePatch, ChapterPatch, EntityWrite, ForumPatch, MangaPatch, PersistenceGateway,
    TeamPatch, UserPatch,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use tankobon_core::{
    Badge, BadgeId, Chapter, ChapterId, ForumId, LogEntry, Manga, MangaId, NewBadge, Notification,
    SubForum, Team, TeamId, User, UserId,
};
use tankobon_error::{PersistenceError, TankobonResult};
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    mangas: BTreeMap<MangaId, Manga>,
    chapters: BTreeMap<ChapterId, Chapter>,
    forums: BTreeMap<ForumId, SubForum>,
    teams: BTreeMap<TeamId, Team>,
    badges: BTreeMap<BadgeId, Badge>,
    logs: Vec<LogEntry>,
    notifications: Vec<Notification>,
}

/// In-memory persistence gateway.
#[derive(Default)]
pub struct MemoryGateway {
    state: RwLock<State>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row.
    pub fn insert_user(&self, user: User) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.users.insert(user.id.clone(), user);
    }

    /// Seed a manga row.
    pub fn insert_manga(&self, manga: Manga) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.mangas.insert(manga.id, manga);
    }

    /// Seed a chapter row.
    pub fn insert_chapter(&self, chapter: Chapter) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.chapters.insert(chapter.id, chapter);
    }

    /// Seed a sub-forum row.
    pub fn insert_forum(&self, forum: SubForum) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.forums.insert(forum.id, forum);
    }

    /// Seed a team row.
    pub fn insert_team(&self, team: Team) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.teams.insert(team.id, team);
    }

    /// Seed a badge row.
    pub fn insert_badge(&self, badge: Badge) {
        let mut state = self.state.write().expect("gateway lock poisoned");
        state.badges.insert(badge.id, badge);
    }

    /// Notifications delivered to one user, oldest first.
    pub fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Number of audit log entries.
    pub fn log_count(&self) -> usize {
        self.state.read().expect("gateway lock poisoned").logs.len()
    }

    fn validate(state: &State, write: &EntityWrite) -> TankobonResult<()> {
        match write {
            EntityWrite::UpdateManga { id, patch } => {
                if !state.mangas.contains_key(id) {
                    Err(PersistenceError::not_found("manga", id))?;
                }
                if let Some(slug) = &patch.slug
                    && state.mangas.values().any(|m| m.id != *id && &m.slug == slug)
                {
                    Err(PersistenceError::new(
                        tankobon_error::PersistenceErrorKind::Conflict(format!(
                            "manga slug {slug} already exists"
                        )),
                    ))?;
                }
            }
            EntityWrite::DeleteManga { id } => {
                if !state.mangas.contains_key(id) {
                    Err(PersistenceError::not_found("manga", id))?;
                }
            }
            EntityWrite::UpdateChapter { id, .. } | EntityWrite::DeleteChapter { id } => {
                if !state.chapters.contains_key(id) {
                    Err(PersistenceError::not_found("chapter", id))?;
                }
            }
            EntityWrite::DeleteChaptersOfManga { .. } => {}
            EntityWrite::UpdateForum { id, .. } | EntityWrite::DeleteForum { id } => {
                if !state.forums.contains_key(id) {
                    Err(PersistenceError::not_found("forum", id))?;
                }
            }
            EntityWrite::UpdateTeam { id, .. } | EntityWrite::DeleteTeam { id } => {
                if !state.teams.contains_key(id) {
                    Err(PersistenceError::not_found("team", id))?;
                }
            }
            EntityWrite::UpdateBadge { id, .. } | EntityWrite::DeleteBadge { id } => {
                if !state.badges.contains_key(id) {
                    Err(PersistenceError::not_found("badge", id))?;
                }
            }
            EntityWrite::UpdateUser { id, .. } => {
                if !state.users.contains_key(id) {
                    Err(PersistenceError::not_found("user", id.clone()))?;
                }
            }
            EntityWrite::InsertNotification { notification } => {
                if !state.users.contains_key(&notification.user_id) {
                    Err(PersistenceError::not_found(
                        "user",
                        notification.user_id.clone(),
                    ))?;
                }
            }
        }
        Ok(())
    }

    fn apply(state: &mut State, write: EntityWrite) {
        match write {
            EntityWrite::UpdateManga { id, patch } => {
                if let Some(manga) = state.mangas.get_mut(&id) {
                    apply_manga_patch(manga, patch);
                }
            }
            EntityWrite::DeleteManga { id } => {
                state.mangas.remove(&id);
            }
            EntityWrite::UpdateChapter { id, patch } => {
                if let Some(chapter) = state.chapters.get_mut(&id) {
                    apply_chapter_patch(chapter, patch);
                }
            }
            EntityWrite::DeleteChapter { id } => {
                state.chapters.remove(&id);
            }
            EntityWrite::DeleteChaptersOfManga { manga_id } => {
                state.chapters.retain(|_, c| c.manga_id != manga_id);
            }
            EntityWrite::UpdateForum { id, patch } => {
                if let Some(forum) = state.forums.get_mut(&id) {
                    apply_forum_patch(forum, patch);
                }
            }
            EntityWrite::DeleteForum { id } => {
                state.forums.remove(&id);
            }
            EntityWrite::UpdateTeam { id, patch } => {
                if let Some(team) = state.teams.get_mut(&id) {
                    apply_team_patch(team, patch);
                }
            }
            EntityWrite::DeleteTeam { id } => {
                state.teams.remove(&id);
            }
            EntityWrite::UpdateBadge { id, patch } => {
                if let Some(badge) = state.badges.get_mut(&id) {
                    apply_badge_patch(badge, patch);
                }
            }
            EntityWrite::DeleteBadge { id } => {
                state.badges.remove(&id);
            }
            EntityWrite::UpdateUser { id, patch } => {
                if let Some(user) = state.users.get_mut(&id) {
                    apply_user_patch(user, patch);
                }
            }
            EntityWrite::InsertNotification { notification } => {
                state.notifications.push(Notification {
                    id: Uuid::new_v4(),
                    user_id: notification.user_id,
                    content: notification.content,
                    created_at: Utc::now(),
                });
            }
        }
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn user(&self, id: &str) -> TankobonResult<User> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("user", id).into())
    }

    async fn manga(&self, id: MangaId) -> TankobonResult<Manga> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .mangas
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("manga", id).into())
    }

    async fn chapter(&self, id: ChapterId) -> TankobonResult<Chapter> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .chapters
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("chapter", id).into())
    }

    async fn chapters_of_manga(&self, manga_id: MangaId) -> TankobonResult<Vec<Chapter>> {
        let state = self.state.read().expect("gateway lock poisoned");
        Ok(state
            .chapters
            .values()
            .filter(|c| c.manga_id == manga_id)
            .cloned()
            .collect())
    }

    async fn forum(&self, id: ForumId) -> TankobonResult<SubForum> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .forums
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("forum", id).into())
    }

    async fn team(&self, id: TeamId) -> TankobonResult<Team> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .teams
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("team", id).into())
    }

    async fn badge(&self, id: BadgeId) -> TankobonResult<Badge> {
        let state = self.state.read().expect("gateway lock poisoned");
        state
            .badges
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("badge", id).into())
    }

    async fn logs(&self, limit: usize, offset: usize) -> TankobonResult<Vec<LogEntry>> {
        let state = self.state.read().expect("gateway lock poisoned");
        let mut entries: Vec<_> = state.logs.clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries.into_iter().skip(offset).take(limit).collect())
    }

    #[tracing::instrument(skip(self, badge), fields(name = %badge.name))]
    async fn create_badge(&self, badge: NewBadge) -> TankobonResult<Badge> {
        let mut state = self.state.write().expect("gateway lock poisoned");
        let id = state.badges.keys().next_back().copied().unwrap_or(0) + 1;
        let created = Badge {
            id,
            name: badge.name,
            description: badge.description,
            color: badge.color,
            icon: None,
        };
        state.badges.insert(id, created.clone());
        Ok(created)
    }

    #[tracing::instrument(skip(self, batch), fields(writes = batch.writes.len()))]
    async fn commit(&self, batch: AuditedBatch) -> TankobonResult<()> {
        let mut state = self.state.write().expect("gateway lock poisoned");

        // Phase 1: validate everything against current state
        for write in &batch.writes {
            Self::validate(&state, write)?;
        }

        // Phase 2: apply the batch and its log line together
        for write in batch.writes {
            Self::apply(&mut state, write);
        }
        state.logs.push(LogEntry::now(batch.log));
        Ok(())
    }
}

fn apply_manga_patch(manga: &mut Manga, patch: MangaPatch) {
    if let Some(slug) = patch.slug {
        manga.slug = slug;
    }
    if let Some(name) = patch.name {
        manga.name = name;
    }
    if let Some(alt_name) = patch.alt_name {
        manga.alt_name = alt_name;
    }
    if let Some(cover) = patch.cover {
        manga.cover = Some(cover);
    }
    if let Some(creator_id) = patch.creator_id {
        manga.creator_id = creator_id;
    }
    if let Some(facebook_link) = patch.facebook_link {
        manga.facebook_link = facebook_link;
    }
    if let Some(discord_link) = patch.discord_link {
        manga.discord_link = discord_link;
    }
}

fn apply_chapter_patch(chapter: &mut Chapter, patch: ChapterPatch) {
    if let Some(index) = patch.index {
        chapter.index = index;
    }
    if let Some(name) = patch.name {
        chapter.name = name;
    }
    if let Some(volume) = patch.volume {
        chapter.volume = volume;
    }
    if let Some(images) = patch.images {
        chapter.images = images;
    }
    if let Some(is_published) = patch.is_published {
        chapter.is_published = is_published;
    }
}

fn apply_forum_patch(forum: &mut SubForum, patch: ForumPatch) {
    if let Some(title) = patch.title {
        forum.title = title;
    }
    if let Some(banner) = patch.banner {
        forum.banner = Some(banner);
    }
}

fn apply_team_patch(team: &mut Team, patch: TeamPatch) {
    if let Some(name) = patch.name {
        team.name = name;
    }
    if let Some(description) = patch.description {
        team.description = description;
    }
    if let Some(cover) = patch.cover {
        team.cover = Some(cover);
    }
    if let Some(owner_id) = patch.owner_id {
        team.owner_id = owner_id;
    }
}

fn apply_badge_patch(badge: &mut Badge, patch: BadgePatch) {
    if let Some(name) = patch.name {
        badge.name = name;
    }
    if let Some(description) = patch.description {
        badge.description = description;
    }
    if let Some(color) = patch.color {
        badge.color = color;
    }
    if let Some(icon) = patch.icon {
        badge.icon = Some(icon);
    }
}

fn apply_user_patch(user: &mut User, patch: UserPatch) {
    if let Some(permissions) = patch.permissions {
        user.permissions = permissions;
    }
    if let Some(two_factor_enabled) = patch.two_factor_enabled {
        user.two_factor_enabled = two_factor_enabled;
    }
    if let Some(is_banned) = patch.is_banned {
        user.is_banned = is_banned;
    }
    if let Some(mute_expires_at) = patch.mute_expires_at {
        user.mute_expires_at = mute_expires_at;
    }
    if let Some(verified) = patch.verified {
        user.verified = verified;
    }
    if let Some(pending_verification) = patch.pending_verification {
        user.pending_verification = pending_verification;
    }
    if let Some(badges) = patch.badges {
        user.badges = badges;
    }
}
