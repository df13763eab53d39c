//! Audit command implementation.

use anyhow::{Context, Result};
use ds_lint::{AuditOptions, Config, Engine};
use std::path::Path;

use super::output;
use crate::AuditFormat;

/// Runs the audit command.
pub fn run(
    path: &Path,
    fix: bool,
    format: AuditFormat,
    rules: Option<String>,
    engine: Engine,
    config: Config,
) -> Result<()> {
    let options = AuditOptions {
        cwd: path.to_path_buf(),
        fix,
        format: format.into(),
        rules,
        engine,
        config: Some(config),
    };

    let outcome = ds_lint::audit(&options).context("Audit failed")?;
    for (file, fixes) in &outcome.fixes {
        for f in fixes {
            tracing::debug!(
                "{}:{}:{} [{}] `{}` -> `{}`",
                file.display(),
                f.line,
                f.column,
                f.code,
                f.before,
                f.after
            );
        }
    }

    let rendered = options.render(&outcome).context("Failed to render report")?;
    output::print(&rendered);
    Ok(())
}
