//! Shared fixtures for admin service tests.

// Each test binary uses a subset of these fixtures
#![allow(dead_code)]

use std::sync::Arc;
use tankobon_admin::AdminContext;
use tankobon_core::{Chapter, Manga, Permission, PermissionSet, SubForum, Team, User};
use tankobon_persistence::MemoryGateway;
use tankobon_storage::MemoryStorage;

/// A context over fresh in-memory gateways, returned alongside handles for
/// seeding and inspection.
pub fn context() -> (AdminContext, Arc<MemoryGateway>, Arc<MemoryStorage>) {
    let gateway = Arc::new(MemoryGateway::new());
    let storage = Arc::new(MemoryStorage::new());
    let ctx = AdminContext::new(gateway.clone(), storage.clone());
    (ctx, gateway, storage)
}

pub fn user(id: &str, permissions: &[Permission]) -> User {
    User {
        id: id.to_string(),
        name: format!("user-{id}"),
        permissions: PermissionSet::from(permissions),
        two_factor_enabled: true,
        is_banned: false,
        mute_expires_at: None,
        verified: false,
        pending_verification: false,
        badges: Vec::new(),
    }
}

pub fn manga(id: i64, creator: &str) -> Manga {
    Manga {
        id,
        slug: format!("manga-{id}"),
        name: format!("Manga {id}"),
        alt_name: None,
        cover: None,
        creator_id: creator.to_string(),
        facebook_link: None,
        discord_link: None,
    }
}

pub fn chapter(id: i64, manga_id: i64) -> Chapter {
    Chapter {
        id,
        manga_id,
        index: id as f64,
        name: format!("Chapter {id}"),
        volume: 1,
        images: Vec::new(),
        is_published: false,
    }
}

pub fn forum(id: i64, creator: &str) -> SubForum {
    SubForum {
        id,
        slug: format!("forum-{id}"),
        title: format!("Forum {id}"),
        banner: None,
        creator_id: creator.to_string(),
    }
}

pub fn team(id: i64, owner: &str) -> Team {
    Team {
        id,
        name: format!("Team {id}"),
        description: "scanlation".to_string(),
        cover: None,
        owner_id: owner.to_string(),
    }
}
