//! CLI probe for the bibliography core.
//!
//! # Responsibility
//! - Verify `bibliography_core` linkage and the built-in template catalogue.
//! - Print a saved document's entries in display order.
//!
//! Usage: `bibliography_cli [document.json]`

use bibliography_core::{core_version, document, DisplayOrder, TemplateRegistry};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("bibliography_core version={}", core_version());

    let registry = match TemplateRegistry::builtin() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("template catalogue is invalid: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("bibliography_core templates={}", registry.len());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match document::load(Path::new(&path), &registry, DisplayOrder::Alphabetical) {
        Ok((list, report)) => {
            for entry in list.display() {
                println!("{}\t{}", entry.type_name, entry.rendered_text);
            }
            println!(
                "loaded={} skipped={}",
                report.loaded,
                report.skipped_unknown_type + report.skipped_invalid_values
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to read `{path}`: {err}");
            ExitCode::FAILURE
        }
    }
}
