//! Shared output for command results.

use ds_lint::{Severity, ValidationRun, ViolationDiagnostic};
use std::collections::BTreeMap;

/// Prints rendered report text.
pub fn print(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}

/// Prints every violation of `run` as a miette diagnostic with its source
/// snippet, followed by a summary line.
pub fn print_diagnostics(run: &ValidationRun) {
    let mut sources: BTreeMap<&std::path::Path, Option<String>> = BTreeMap::new();

    for (file, violation) in run.violations() {
        let source = sources
            .entry(file)
            .or_insert_with(|| std::fs::read_to_string(run.root.join(file)).ok());
        match source {
            Some(text) => {
                let report = miette::Report::new(ViolationDiagnostic::new(violation, text));
                println!("{} {report:?}", severity_label(violation.severity));
            }
            // Changed or removed since it was checked.
            None => println!("{violation}"),
        }
    }

    for (file, result) in &run.results {
        if let Some(error) = result.read_error() {
            println!("{}: could not read: {error}", file.display());
        }
    }

    let (errors, warnings, infos) = run.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, run.files_scanned
    );
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}
