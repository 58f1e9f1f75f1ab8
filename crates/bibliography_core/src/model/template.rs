//! Citation template model.
//!
//! # Responsibility
//! - Describe one citation style: ordered fields plus its formatter.
//! - Parse the compact `Label:placeholder | ...` field declaration.
//!
//! # Invariants
//! - A template is immutable once built.
//! - `formatter` accepts exactly `fields.len()` values (checked in `new`).
//! - A today-token placeholder is resolved when a form is populated, never
//!   during formatting.

use crate::format::{escape_markup, FormatError, FormatResult, Formatter};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter as FmtFormatter};

/// Special placeholder token that resolves to today's date.
pub const TODAY_TOKEN: &str = "datenow";
/// Rendering used for resolved dates, e.g. `16 October 2026`.
pub const DATE_FORMAT: &str = "%d %B %Y";

const TOKEN_PREFIX: char = '*';

/// Template construction errors. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    EmptyName,
    NoFields(String),
    EmptyLabel { template: String, position: usize },
    UnknownToken { template: String, token: String },
    Formatter { template: String, source: FormatError },
    WebFieldOutOfRange { template: String, index: usize },
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "template name cannot be empty"),
            Self::NoFields(name) => write!(f, "template `{name}` declares no fields"),
            Self::EmptyLabel { template, position } => {
                write!(f, "template `{template}` field {position} has an empty label")
            }
            Self::UnknownToken { template, token } => {
                write!(f, "template `{template}` uses unknown placeholder token `{token}`")
            }
            Self::Formatter { template, source } => {
                write!(f, "template `{template}` formatter is invalid: {source}")
            }
            Self::WebFieldOutOfRange { template, index } => {
                write!(f, "template `{template}` web field index {index} is out of range")
            }
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Formatter { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Example text shown for an empty form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// Literal example value (may be empty).
    Example(String),
    /// Today's date, resolved when the form is populated.
    Today,
}

impl Placeholder {
    /// Returns the literal example, with the today token rendered for `today`.
    pub fn resolve(&self, today: NaiveDate) -> String {
        match self {
            Self::Example(text) => text.clone(),
            Self::Today => format_date(today),
        }
    }
}

/// Renders a date the way citation access dates are written.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One labelled input of a citation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub placeholder: Placeholder,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, placeholder: Placeholder) -> Self {
        Self {
            label: label.into(),
            placeholder,
        }
    }
}

/// Field positions a browser bookmark can prefill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebFields {
    pub title: usize,
    pub url: usize,
}

/// Named citation style with its fields and formatting policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationTemplate {
    name: String,
    fields: Vec<FieldSpec>,
    formatter: Formatter,
    web_fields: Option<WebFields>,
}

impl CitationTemplate {
    /// Builds a template, checking the formatter against the field count.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        formatter: Formatter,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if fields.is_empty() {
            return Err(TemplateError::NoFields(name));
        }
        if let Some(position) = fields.iter().position(|field| field.label.is_empty()) {
            return Err(TemplateError::EmptyLabel {
                template: name,
                position,
            });
        }
        if let Err(source) = formatter.validate(fields.len()) {
            return Err(TemplateError::Formatter {
                template: name,
                source,
            });
        }

        Ok(Self {
            name,
            fields,
            formatter,
            web_fields: None,
        })
    }

    /// Builds a template from a `Label:placeholder | ...` declaration.
    pub fn declare(
        name: impl Into<String>,
        declaration: &str,
        formatter: Formatter,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let fields = parse_fields(&name, declaration)?;
        Self::new(name, fields, formatter)
    }

    /// Marks the title and URL fields a bookmark import can fill in.
    pub fn with_web_fields(mut self, title: usize, url: usize) -> Result<Self, TemplateError> {
        for index in [title, url] {
            if index >= self.fields.len() {
                return Err(TemplateError::WebFieldOutOfRange {
                    template: self.name,
                    index,
                });
            }
        }
        self.web_fields = Some(WebFields { title, url });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn web_fields(&self) -> Option<WebFields> {
        self.web_fields
    }

    /// Formats already-escaped values.
    pub fn format(&self, escaped: &[String]) -> FormatResult<String> {
        if escaped.len() != self.fields.len() {
            return Err(FormatError::FieldCountMismatch {
                expected: self.fields.len(),
                actual: escaped.len(),
            });
        }
        self.formatter.format(escaped)
    }

    /// Escapes raw user values, then formats them.
    pub fn render<S: AsRef<str>>(&self, raw: &[S]) -> FormatResult<String> {
        let escaped: Vec<String> = raw.iter().map(|value| escape_markup(value.as_ref())).collect();
        self.format(&escaped)
    }

    /// Renders the template's own placeholders as an example citation.
    pub fn example(&self, today: NaiveDate) -> FormatResult<String> {
        let placeholders: Vec<String> = self
            .fields
            .iter()
            .map(|field| field.placeholder.resolve(today))
            .collect();
        self.render(&placeholders)
    }
}

fn parse_fields(template: &str, declaration: &str) -> Result<Vec<FieldSpec>, TemplateError> {
    declaration
        .split('|')
        .enumerate()
        .map(|(position, item)| {
            // Only the first colon separates; URLs keep theirs.
            let (label, placeholder) = match item.trim().split_once(':') {
                Some((label, placeholder)) => (label.trim(), placeholder.trim()),
                None => (item.trim(), ""),
            };
            if label.is_empty() {
                return Err(TemplateError::EmptyLabel {
                    template: template.to_string(),
                    position,
                });
            }
            Ok(FieldSpec::new(label, parse_placeholder(template, placeholder)?))
        })
        .collect()
}

fn parse_placeholder(template: &str, raw: &str) -> Result<Placeholder, TemplateError> {
    match raw.strip_prefix(TOKEN_PREFIX) {
        Some(TODAY_TOKEN) => Ok(Placeholder::Today),
        Some(token) => Err(TemplateError::UnknownToken {
            template: template.to_string(),
            token: token.to_string(),
        }),
        None => Ok(Placeholder::Example(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{CitationTemplate, Placeholder, TemplateError};
    use crate::format::Formatter;
    use chrono::NaiveDate;

    #[test]
    fn declare_keeps_colons_inside_placeholders() {
        let template = CitationTemplate::declare(
            "Website",
            "Title:Home | Accessed:*datenow | URL:http://sugarlabs.org/",
            Formatter::basic("<i>{}</i>, accessed {}, &lt;{}&gt;"),
        )
        .unwrap();

        let fields = template.fields();
        assert_eq!(fields[0].label, "Title");
        assert_eq!(fields[1].placeholder, Placeholder::Today);
        assert_eq!(
            fields[2].placeholder,
            Placeholder::Example("http://sugarlabs.org/".to_string())
        );
    }

    #[test]
    fn declare_rejects_unknown_tokens() {
        let err = CitationTemplate::declare("Odd", "When:*tomorrow", Formatter::basic("{}"))
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownToken { ref token, .. } if token == "tomorrow"
        ));
    }

    #[test]
    fn new_rejects_arity_mismatch() {
        let err = CitationTemplate::declare("Short", "A:1 | B:2", Formatter::basic("{}"))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Formatter { .. }));
    }

    #[test]
    fn example_resolves_today_and_escapes() {
        let template = CitationTemplate::declare(
            "Note",
            "Author:Fiell & Fiell | Accessed:*datenow",
            Formatter::basic("{} ({})"),
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2015, 1, 3).unwrap();
        assert_eq!(
            template.example(today).unwrap(),
            "Fiell &amp; Fiell (03 January 2015)"
        );
    }

    #[test]
    fn web_fields_must_be_in_range() {
        let template =
            CitationTemplate::declare("Site", "Title:x | URL:y", Formatter::basic("{} {}"))
                .expect("two fields for two slots");
        assert!(template.clone().with_web_fields(0, 1).is_ok());
        assert!(matches!(
            template.with_web_fields(0, 2),
            Err(TemplateError::WebFieldOutOfRange { index: 2, .. })
        ));
    }
}
