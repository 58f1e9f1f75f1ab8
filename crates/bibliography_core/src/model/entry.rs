//! Bibliography entry model.
//!
//! # Responsibility
//! - Define the in-memory entry record and its persisted 3-tuple row.
//! - Convert between the two without losing raw field values.
//!
//! # Invariants
//! - `id` is generated at creation and never reused for another entry.
//! - `rendered_text` equals the owning template's render of `raw_values`
//!   after every create or edit.
//! - Content equality (`same_content`) ignores `id`.
//!
//! # See also
//! - crate::list::entry_list

use crate::format::FormatResult;
use crate::model::template::CitationTemplate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable per-entry identifier used for edit/delete and collaboration.
pub type EntryId = Uuid;

/// Entry decoding errors.
#[derive(Debug)]
pub enum EntryError {
    /// The raw-values column is not a JSON array of strings.
    InvalidRawValues(serde_json::Error),
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRawValues(err) => write!(f, "invalid raw values json: {err}"),
        }
    }
}

impl Error for EntryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRawValues(err) => Some(err),
        }
    }
}

/// Persisted and wire shape: `[renderedMarkup, typeName, rawValuesJson]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct EntryRow {
    pub rendered_text: String,
    pub type_name: String,
    /// JSON-encoded `Vec<String>` of unescaped field values.
    pub raw_values_json: String,
}

impl From<(String, String, String)> for EntryRow {
    fn from((rendered_text, type_name, raw_values_json): (String, String, String)) -> Self {
        Self {
            rendered_text,
            type_name,
            raw_values_json,
        }
    }
}

impl From<EntryRow> for (String, String, String) {
    fn from(row: EntryRow) -> Self {
        (row.rendered_text, row.type_name, row.raw_values_json)
    }
}

impl EntryRow {
    /// Decodes the raw-values column.
    pub fn raw_values(&self) -> Result<Vec<String>, EntryError> {
        serde_json::from_str(&self.raw_values_json).map_err(EntryError::InvalidRawValues)
    }
}

/// One bibliography record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographyEntry {
    pub id: EntryId,
    /// Markup produced by the template formatter.
    pub rendered_text: String,
    /// Name of the template that produced `rendered_text`.
    pub type_name: String,
    /// Unescaped field values in template order.
    pub raw_values: Vec<String>,
}

impl BibliographyEntry {
    /// Creates an entry with a freshly generated id.
    pub fn new(
        rendered_text: impl Into<String>,
        type_name: impl Into<String>,
        raw_values: Vec<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), rendered_text, type_name, raw_values)
    }

    /// Creates an entry under an id that already exists elsewhere
    /// (remote peers, edits).
    pub fn with_id(
        id: EntryId,
        rendered_text: impl Into<String>,
        type_name: impl Into<String>,
        raw_values: Vec<String>,
    ) -> Self {
        Self {
            id,
            rendered_text: rendered_text.into(),
            type_name: type_name.into(),
            raw_values,
        }
    }

    /// Renders `raw_values` with `template` and builds a new entry.
    pub fn create(template: &CitationTemplate, raw_values: Vec<String>) -> FormatResult<Self> {
        let rendered_text = template.render(&raw_values)?;
        Ok(Self::new(rendered_text, template.name(), raw_values))
    }

    /// Decodes a persisted row under a new id.
    pub fn from_row(row: &EntryRow) -> Result<Self, EntryError> {
        Self::from_row_with_id(Uuid::new_v4(), row)
    }

    pub fn from_row_with_id(id: EntryId, row: &EntryRow) -> Result<Self, EntryError> {
        Ok(Self::with_id(
            id,
            row.rendered_text.clone(),
            row.type_name.clone(),
            row.raw_values()?,
        ))
    }

    pub fn to_row(&self) -> EntryRow {
        EntryRow {
            rendered_text: self.rendered_text.clone(),
            type_name: self.type_name.clone(),
            raw_values_json: self.raw_values_json(),
        }
    }

    pub fn raw_values_json(&self) -> String {
        serde_json::Value::from(self.raw_values.clone()).to_string()
    }

    /// Structural equality over `(text, type, values)`, ignoring ids.
    pub fn same_content(&self, other: &Self) -> bool {
        self.rendered_text == other.rendered_text
            && self.type_name == other.type_name
            && self.raw_values == other.raw_values
    }

    /// Compares against a row, decoding its raw values.
    ///
    /// Rows whose raw values cannot be decoded never match.
    pub fn matches_row(&self, row: &EntryRow) -> bool {
        self.rendered_text == row.rendered_text
            && self.type_name == row.type_name
            && row
                .raw_values()
                .map(|values| values == self.raw_values)
                .unwrap_or(false)
    }

    /// Returns whether `rendered_text` is what `template` renders today.
    pub fn is_consistent_with(&self, template: &CitationTemplate) -> bool {
        template.name() == self.type_name
            && template
                .render(&self.raw_values)
                .map(|text| text == self.rendered_text)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{BibliographyEntry, EntryRow};

    fn sample() -> BibliographyEntry {
        BibliographyEntry::new(
            "Shoup, K 2008",
            "Book",
            vec!["Shoup".to_string(), "K".to_string()],
        )
    }

    #[test]
    fn row_serializes_as_three_element_array() {
        let row = sample().to_row();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["Shoup, K 2008", "Book", "[\"Shoup\",\"K\"]"])
        );
    }

    #[test]
    fn row_accepts_spaced_raw_values_json() {
        let row: EntryRow =
            serde_json::from_str(r#"["Shoup, K 2008", "Book", "[\"Shoup\", \"K\"]"]"#).unwrap();
        assert!(sample().matches_row(&row));
        let decoded = BibliographyEntry::from_row(&row).unwrap();
        assert!(decoded.same_content(&sample()));
    }

    #[test]
    fn same_content_ignores_ids() {
        let a = sample();
        let mut b = a.clone();
        b.id = uuid::Uuid::new_v4();
        assert_ne!(a, b);
        assert!(a.same_content(&b));
    }

    #[test]
    fn invalid_raw_values_fail_to_decode() {
        let row = EntryRow {
            rendered_text: "x".to_string(),
            type_name: "Book".to_string(),
            raw_values_json: "not json".to_string(),
        };
        assert!(BibliographyEntry::from_row(&row).is_err());
        assert!(!sample().matches_row(&row));
    }
}
