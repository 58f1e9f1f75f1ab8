//! Entry form model.
//!
//! # Responsibility
//! - Hold the editable field values for one template.
//! - Resolve the today token when the form is populated.
//! - Turn submitted values into a `BibliographyEntry`.
//!
//! # Invariants
//! - `values.len()` always equals the template's field count.
//! - Stored raw values are unescaped; escaping happens only on render.

pub mod bookmark;

use crate::format::FormatResult;
use crate::model::entry::{BibliographyEntry, EntryId};
use crate::model::template::{format_date, CitationTemplate, Placeholder};
use bookmark::Bookmark;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form input errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    FieldOutOfRange { index: usize, field_count: usize },
    ValueCountMismatch { expected: usize, actual: usize },
    NotWebTemplate(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldOutOfRange { index, field_count } => {
                write!(f, "field {index} does not exist in a {field_count}-field form")
            }
            Self::ValueCountMismatch { expected, actual } => {
                write!(f, "form expects {expected} values, got {actual}")
            }
            Self::NotWebTemplate(name) => {
                write!(f, "template `{name}` cannot be filled from a bookmark")
            }
        }
    }
}

impl Error for FormError {}

/// Local calendar date, used to resolve the today token.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Editable values for one citation template.
#[derive(Debug, Clone)]
pub struct EntryForm<'t> {
    template: &'t CitationTemplate,
    values: Vec<String>,
}

impl<'t> EntryForm<'t> {
    /// Blank form; the today-token field is prefilled with `today`.
    pub fn new(template: &'t CitationTemplate, today: NaiveDate) -> Self {
        let values = template
            .fields()
            .iter()
            .map(|field| match field.placeholder {
                Placeholder::Today => format_date(today),
                Placeholder::Example(_) => String::new(),
            })
            .collect();
        Self { template, values }
    }

    /// Form preloaded with an existing entry's raw values.
    pub fn for_edit(
        template: &'t CitationTemplate,
        previous: Vec<String>,
    ) -> Result<Self, FormError> {
        if previous.len() != template.field_count() {
            return Err(FormError::ValueCountMismatch {
                expected: template.field_count(),
                actual: previous.len(),
            });
        }
        Ok(Self {
            template,
            values: previous,
        })
    }

    /// Form prefilled from a browser bookmark.
    ///
    /// The today-token field takes the bookmark's save date when known.
    pub fn from_bookmark(
        template: &'t CitationTemplate,
        bookmark: &Bookmark,
        today: NaiveDate,
    ) -> Result<Self, FormError> {
        let web = template
            .web_fields()
            .ok_or_else(|| FormError::NotWebTemplate(template.name().to_string()))?;
        let mut form = Self::new(template, bookmark.date().unwrap_or(today));
        if let Some(title) = &bookmark.title {
            form.values[web.title] = title.clone();
        }
        if let Some(url) = &bookmark.url {
            form.values[web.url] = url.clone();
        }
        Ok(form)
    }

    pub fn template(&self) -> &'t CitationTemplate {
        self.template
    }

    /// Field labels with their example text, in template order.
    pub fn fields(&self, today: NaiveDate) -> Vec<(&'t str, String)> {
        self.template
            .fields()
            .iter()
            .map(|field| (field.label.as_str(), field.placeholder.resolve(today)))
            .collect()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        let field_count = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(FormError::FieldOutOfRange { index, field_count })?;
        *slot = value.into();
        Ok(())
    }

    /// Example citation shown above the form.
    pub fn example(&self, today: NaiveDate) -> FormatResult<String> {
        self.template.example(today)
    }

    /// Renders the current values into a new entry.
    pub fn submit(&self) -> FormatResult<BibliographyEntry> {
        BibliographyEntry::create(self.template, self.values.clone())
    }

    /// Renders the current values as a replacement for entry `id`.
    pub fn submit_edit(&self, id: EntryId) -> FormatResult<BibliographyEntry> {
        let rendered = self.template.render(&self.values)?;
        Ok(BibliographyEntry::with_id(
            id,
            rendered,
            self.template.name(),
            self.values.clone(),
        ))
    }
}
