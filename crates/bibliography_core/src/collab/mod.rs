//! Best-effort collaboration over a shared entry list.
//!
//! # Responsibility
//! - Define the `{action, args}` wire messages.
//! - Broadcast local mutations and replay peer mutations.
//!
//! # Invariants
//! - No causal ordering, deduplication or conflict resolution is attempted.
//! - Messages address entries by id; content matching is the fallback.

pub mod message;
pub mod session;

pub use message::CollabMessage;
pub use session::{ChannelError, CollabError, CollabSession, MessageChannel, RemoteOutcome};
