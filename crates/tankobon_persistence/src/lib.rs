//! Persistence gateway contract and in-memory reference implementation.
//!
//! The admin services talk to the relational store through the
//! [`PersistenceGateway`] trait: entity reads, audit log listing, and a single
//! atomic [`PersistenceGateway::commit`] primitive that applies a batch of
//! entity writes together with exactly one audit log append, all or nothing.
//!
//! Schema and migrations belong to the backing store and are out of scope
//! here; [`MemoryGateway`] is the in-process implementation used by tests and
//! local development.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gateway;
mod memory;
mod write;

pub use gateway::PersistenceGateway;
pub use memory::MemoryGateway;
pub use tankobon_error::{PersistenceError, PersistenceErrorKind};
pub use write::{
    AuditedBatch, BadgePatch, ChapterPatch, EntityWrite, ForumPatch, MangaPatch, TeamPatch,
    UserPatch,
};
