//! Session entry list.
//!
//! # Responsibility
//! - Hold the ordered bibliography entries of one document session.
//! - Apply add/edit/delete and expose persisted rows.
//!
//! # See also
//! - crate::collab for replaying the same mutations from peers.

pub mod entry_list;

pub use entry_list::{DisplayOrder, EntryList, ListChange, LoadReport};
