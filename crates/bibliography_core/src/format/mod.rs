//! Citation formatting strategies.
//!
//! # Responsibility
//! - Position already-escaped field values into citation markup.
//! - Provide the markup escaping applied by forms before formatting.
//!
//! # Invariants
//! - Formatting is pure: identical input always yields identical output.
//! - Formatters never escape; callers pass escaped values.

pub mod formatter;
pub mod markup;

pub use formatter::{fill_slots, FormatError, FormatResult, Formatter};
pub use markup::escape_markup;
