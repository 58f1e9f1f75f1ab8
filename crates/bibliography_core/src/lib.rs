//! Core domain logic for the bibliography builder.
//! Citation templates, the session entry list, document persistence and
//! collaboration replay live here; UI layers only call into this crate.

pub mod collab;
pub mod document;
pub mod form;
pub mod format;
pub mod list;
pub mod logging;
pub mod model;
pub mod registry;

pub use collab::{
    ChannelError, CollabError, CollabMessage, CollabSession, MessageChannel, RemoteOutcome,
};
pub use document::{DocumentError, DocumentResult, DOCUMENT_MIME_TYPE};
pub use form::bookmark::{parse_shared_links, Bookmark};
pub use form::{today, EntryForm, FormError};
pub use format::{escape_markup, FormatError, FormatResult, Formatter};
pub use list::{DisplayOrder, EntryList, ListChange, LoadReport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{BibliographyEntry, EntryError, EntryId, EntryRow};
pub use model::template::{CitationTemplate, FieldSpec, Placeholder, TemplateError, WebFields};
pub use registry::{RegistryError, TemplateRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
