//! Domain model for citation templates and bibliography entries.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted 3-tuple row shape separate from in-memory entries.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId` while in memory.
//! - Templates are immutable after construction.

pub mod entry;
pub mod template;
