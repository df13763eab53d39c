//! Validate command implementation.

use anyhow::{Context, Result};
use ds_lint::{Config, Engine, ValidateOptions};
use std::path::Path;

use super::output;
use crate::OutputFormat;

/// Runs the validate command.
///
/// Returns `false` when violations at or above the configured `fail_on`
/// severity were found.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules: Option<String>,
    engine: Engine,
    config: Config,
) -> Result<bool> {
    let threshold = config.fail_threshold();

    let options = ValidateOptions {
        cwd: path.to_path_buf(),
        format: format.report_format().unwrap_or_default(),
        rules,
        engine,
        config: Some(config),
    };

    tracing::info!("Validating {:?} with the {} engine", path, engine);
    let run = ds_lint::validate(&options).context("Validation failed")?;

    if format == OutputFormat::Diagnostic {
        output::print_diagnostics(&run);
    } else {
        let rendered = options.render(&run).context("Failed to render results")?;
        output::print(&rendered);
    }

    Ok(!run.has_violations_at(threshold))
}
