//! Formatter strategies for citation templates.
//!
//! # Responsibility
//! - Map an ordered list of field values to one markup string.
//! - Validate pattern arity against a template's field count.
//!
//! # Invariants
//! - A pattern slot is the literal `{}`; patterns carry no other braces.
//! - `format` never mutates its input and is deterministic.
//! - A value is "blank" when it is empty after trimming whitespace.

use std::error::Error;
use std::fmt::{Display, Formatter as FmtFormatter};

const SLOT: &str = "{}";

pub type FormatResult<T> = Result<T, FormatError>;

/// Arity and index errors raised by formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Pattern slot count does not match the number of positioned values.
    SlotMismatch { slots: usize, values: usize },
    /// A designated field index lies outside the template's field list.
    IndexOutOfRange { index: usize, field_count: usize },
    /// A page-range formatter uses the same field for start and end.
    OverlappingFields(usize),
    /// Value list length differs from the template's field count.
    FieldCountMismatch { expected: usize, actual: usize },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotMismatch { slots, values } => {
                write!(f, "pattern has {slots} slots but {values} values were given")
            }
            Self::IndexOutOfRange { index, field_count } => {
                write!(f, "field index {index} is out of range for {field_count} fields")
            }
            Self::OverlappingFields(index) => {
                write!(f, "field index {index} is used twice by one formatter")
            }
            Self::FieldCountMismatch { expected, actual } => {
                write!(f, "expected {expected} field values, got {actual}")
            }
        }
    }
}

impl Error for FormatError {}

/// Formatting policy attached to a citation template.
///
/// Each variant is one family of citation layout. All variants take the full
/// field list in template order; derived clauses are computed internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatter {
    /// Positional substitution of every value.
    Basic { pattern: String },
    /// Drops a blank edition field and switches to the shorter pattern.
    EditionElision {
        without_edition: String,
        with_edition: String,
        index: usize,
    },
    /// Volume, issue and date-of-issue fields at `first`, `first + 1`,
    /// `first + 2` each become an optional clause (` vol. X,`, ` no. Y,`,
    /// ` Z,`), empty when blank.
    IssueClauses { pattern: String, first: usize },
    /// Folds start/end pages into `p. N` or `pp. N-M`; the end slot is removed.
    PageRange {
        pattern: String,
        start: usize,
        end: usize,
    },
    /// Replaces one field in place with `clause` (one slot) or nothing when blank.
    OptionalClause {
        pattern: String,
        index: usize,
        clause: String,
    },
}

impl Formatter {
    pub fn basic(pattern: impl Into<String>) -> Self {
        Self::Basic {
            pattern: pattern.into(),
        }
    }

    pub fn edition(
        without_edition: impl Into<String>,
        with_edition: impl Into<String>,
        index: usize,
    ) -> Self {
        Self::EditionElision {
            without_edition: without_edition.into(),
            with_edition: with_edition.into(),
            index,
        }
    }

    pub fn issue_clauses(pattern: impl Into<String>, first: usize) -> Self {
        Self::IssueClauses {
            pattern: pattern.into(),
            first,
        }
    }

    pub fn page_range(pattern: impl Into<String>, start: usize, end: usize) -> Self {
        Self::PageRange {
            pattern: pattern.into(),
            start,
            end,
        }
    }

    /// Trailing `, License: <url>` clause.
    pub fn license(pattern: impl Into<String>, index: usize) -> Self {
        Self::OptionalClause {
            pattern: pattern.into(),
            index,
            clause: ", License: &lt;{}&gt;".to_string(),
        }
    }

    /// Trailing `, place` clause.
    pub fn place(pattern: impl Into<String>, index: usize) -> Self {
        Self::OptionalClause {
            pattern: pattern.into(),
            index,
            clause: ", {}".to_string(),
        }
    }

    /// Formats escaped field values into citation markup.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `values` is shorter than a designated index.
    /// - `SlotMismatch` when the positioned values do not fill the pattern.
    pub fn format(&self, values: &[String]) -> FormatResult<String> {
        match self {
            Self::Basic { pattern } => fill_slots(pattern, values),
            Self::EditionElision {
                without_edition,
                with_edition,
                index,
            } => {
                check_index(*index, values.len())?;
                if is_blank(&values[*index]) {
                    let mut remaining = values.to_vec();
                    remaining.remove(*index);
                    fill_slots(without_edition, &remaining)
                } else {
                    fill_slots(with_edition, values)
                }
            }
            Self::IssueClauses { pattern, first } => {
                check_index(first + 2, values.len())?;
                let mut positioned = values.to_vec();
                positioned[*first] = optional_clause(" vol. {},", &values[*first]);
                positioned[first + 1] = optional_clause(" no. {},", &values[first + 1]);
                positioned[first + 2] = optional_clause(" {},", &values[first + 2]);
                fill_slots(pattern, &positioned)
            }
            Self::PageRange {
                pattern,
                start,
                end,
            } => {
                check_index(*start, values.len())?;
                check_index(*end, values.len())?;
                let first = &values[*start];
                let last = &values[*end];
                let pages = if is_blank(last) || first.trim() == last.trim() {
                    format!("p. {first}")
                } else {
                    format!("pp. {first}-{last}")
                };
                let mut positioned = values.to_vec();
                positioned[*start] = pages;
                positioned.remove(*end);
                fill_slots(pattern, &positioned)
            }
            Self::OptionalClause {
                pattern,
                index,
                clause,
            } => {
                check_index(*index, values.len())?;
                let mut positioned = values.to_vec();
                positioned[*index] = optional_clause(clause, &values[*index]);
                fill_slots(pattern, &positioned)
            }
        }
    }

    /// Checks that this formatter accepts exactly `field_count` values.
    pub fn validate(&self, field_count: usize) -> FormatResult<()> {
        match self {
            Self::Basic { pattern } => expect_slots(pattern, field_count),
            Self::EditionElision {
                without_edition,
                with_edition,
                index,
            } => {
                check_index(*index, field_count)?;
                expect_slots(with_edition, field_count)?;
                expect_slots(without_edition, field_count - 1)
            }
            Self::IssueClauses { pattern, first } => {
                check_index(first + 2, field_count)?;
                expect_slots(pattern, field_count)
            }
            Self::PageRange {
                pattern,
                start,
                end,
            } => {
                check_index(*start, field_count)?;
                check_index(*end, field_count)?;
                if start == end {
                    return Err(FormatError::OverlappingFields(*start));
                }
                expect_slots(pattern, field_count - 1)
            }
            Self::OptionalClause {
                pattern,
                index,
                clause,
            } => {
                check_index(*index, field_count)?;
                expect_slots(clause, 1)?;
                expect_slots(pattern, field_count)
            }
        }
    }
}

/// Substitutes `values` into the `{}` slots of `pattern`, left to right.
///
/// Values are inserted verbatim; braces inside a value are not re-scanned.
pub fn fill_slots<S: AsRef<str>>(pattern: &str, values: &[S]) -> FormatResult<String> {
    let slots = slot_count(pattern);
    if slots != values.len() {
        return Err(FormatError::SlotMismatch {
            slots,
            values: values.len(),
        });
    }

    let value_len: usize = values.iter().map(|value| value.as_ref().len()).sum();
    let mut out = String::with_capacity(pattern.len() + value_len);
    let mut pieces = pattern.split(SLOT);
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for (piece, value) in pieces.zip(values) {
        out.push_str(value.as_ref());
        out.push_str(piece);
    }
    Ok(out)
}

fn slot_count(pattern: &str) -> usize {
    pattern.matches(SLOT).count()
}

fn expect_slots(pattern: &str, expected: usize) -> FormatResult<()> {
    let slots = slot_count(pattern);
    if slots == expected {
        Ok(())
    } else {
        Err(FormatError::SlotMismatch {
            slots,
            values: expected,
        })
    }
}

fn check_index(index: usize, field_count: usize) -> FormatResult<()> {
    if index < field_count {
        Ok(())
    } else {
        Err(FormatError::IndexOutOfRange { index, field_count })
    }
}

fn optional_clause(clause: &str, value: &str) -> String {
    if is_blank(value) {
        return String::new();
    }
    // The clause always holds exactly one slot.
    clause.replacen(SLOT, value, 1)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
