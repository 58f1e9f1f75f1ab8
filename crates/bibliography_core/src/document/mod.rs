//! Persisted bibliography document.
//!
//! # Responsibility
//! - Encode an `EntryList` as a JSON array of 3-element rows.
//! - Decode documents back into a list, skipping corrupt rows.
//!
//! # Invariants
//! - Rows are written in insertion order.
//! - An empty array is a valid (empty) document.
//! - Entry ids are not persisted; loading assigns fresh ids.

use crate::list::{DisplayOrder, EntryList, LoadReport};
use crate::model::entry::EntryRow;
use crate::registry::TemplateRegistry;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// MIME type recorded for saved documents.
pub const DOCUMENT_MIME_TYPE: &str = "application/json+bib";

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document read/write errors.
#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "document io failed: {err}"),
            Self::Json(err) => write!(f, "document is not valid json: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the list's rows as a JSON array.
pub fn to_json(list: &EntryList) -> DocumentResult<String> {
    Ok(serde_json::to_string(&list.serialize())?)
}

/// Parses a JSON document into a fresh list.
pub fn from_json(
    json: &str,
    registry: &TemplateRegistry,
    order: DisplayOrder,
) -> DocumentResult<(EntryList, LoadReport)> {
    let rows: Vec<EntryRow> = serde_json::from_str(json)?;
    let mut list = EntryList::with_order(order);
    let report = list.load_all(&rows, registry);
    Ok((list, report))
}

/// Writes the document to `path`, replacing any existing file.
pub fn save(path: &Path, list: &EntryList) -> DocumentResult<()> {
    let json = to_json(list)?;
    std::fs::write(path, json)?;
    info!(
        "event=document_save module=document status=ok entries={}",
        list.len()
    );
    Ok(())
}

/// Reads a document from `path`.
pub fn load(
    path: &Path,
    registry: &TemplateRegistry,
    order: DisplayOrder,
) -> DocumentResult<(EntryList, LoadReport)> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json, registry, order)
}

#[cfg(test)]
mod tests {
    use super::{from_json, to_json, DocumentError};
    use crate::list::{DisplayOrder, EntryList};
    use crate::registry::TemplateRegistry;

    #[test]
    fn empty_array_is_an_empty_document() {
        let registry = TemplateRegistry::builtin().unwrap();
        let (list, report) = from_json("[]", &registry, DisplayOrder::default()).unwrap();
        assert!(list.is_empty());
        assert_eq!(report.loaded, 0);
        assert_eq!(to_json(&EntryList::new()).unwrap(), "[]");
    }

    #[test]
    fn non_array_document_is_rejected() {
        let registry = TemplateRegistry::builtin().unwrap();
        let err = from_json("{\"rows\": []}", &registry, DisplayOrder::default()).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }
}
