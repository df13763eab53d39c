//! The `validate` and `audit` entry points.

use crate::options::{AuditOptions, Engine, ValidateOptions};
use ds_lint_core::report::{self, AuditReport, FixSummary};
use ds_lint_core::{fix, Config, ConfigError, FixLog, ValidationRun, Validator, ValidatorError};
use ds_lint_rules::registry_from_config;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["ds-lint.toml", ".ds-lint.toml"];

/// Errors from the entry points.
///
/// Only setup can fail. Unreadable files and failing rules are recorded in
/// the results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The validator could not be built.
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured preset does not exist.
    #[error("Invalid configuration: {0}")]
    Preset(String),

    /// A report could not be rendered.
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// The result of [`audit`].
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// Report of the final state: post-fix when fixes were applied.
    pub report: AuditReport,
    /// Fixes applied, keyed by path relative to the scanned directory.
    pub fixes: BTreeMap<PathBuf, Vec<FixLog>>,
}

/// Looks for a config file in `root`.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn discover_config(root: &Path) -> Result<Option<(PathBuf, Config)>, ConfigError> {
    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.is_file() {
            debug!("Using config {}", path.display());
            let config = Config::from_file(&path)?;
            return Ok(Some((path, config)));
        }
    }
    Ok(None)
}

fn build_validator(
    cwd: &Path,
    rules: Option<&str>,
    engine: Engine,
    config: Option<&Config>,
) -> Result<Validator, Error> {
    let config = match config {
        Some(config) => config.clone(),
        None => discover_config(cwd)?.map(|(_, c)| c).unwrap_or_default(),
    };
    let mut registry = registry_from_config(&config).map_err(Error::Preset)?;
    if let Some(rules) = rules {
        registry = registry.filter(rules);
    }

    let validator = Validator::builder()
        .root(cwd)
        .registry(registry)
        .extractor(engine.extractor())
        .config(config)
        .build()?;
    Ok(validator)
}

/// Scans `options.cwd` and returns the per-file results.
///
/// # Errors
///
/// Returns an error if the directory is invalid or the configuration cannot
/// be loaded.
pub fn validate(options: &ValidateOptions) -> Result<ValidationRun, Error> {
    let validator = build_validator(
        &options.cwd,
        options.rules.as_deref(),
        options.engine,
        options.config.as_ref(),
    )?;
    Ok(validator.validate())
}

/// Scans `options.cwd` and builds an audit report.
///
/// With `fix` set and at least one auto-fixable violation, fixes are
/// written to disk, the directory is validated again, and the report
/// describes the post-fix state along with what the fixes changed.
///
/// # Errors
///
/// Returns an error if the directory is invalid or the configuration cannot
/// be loaded.
pub fn audit(options: &AuditOptions) -> Result<AuditOutcome, Error> {
    let validator = build_validator(
        &options.cwd,
        options.rules.as_deref(),
        options.engine,
        options.config.as_ref(),
    )?;
    let registry = validator.registry();
    let before = validator.validate();
    let report = AuditReport::build(&before, registry);

    if !options.fix || report.summary.auto_fixable == 0 {
        return Ok(AuditOutcome {
            report,
            fixes: BTreeMap::new(),
        });
    }

    info!("Applying {} auto-fix(es)", report.summary.auto_fixable);
    let fixes = fix::apply(&before, registry);
    let after = validator.validate();
    let summary = FixSummary::compute(&before, &after, &fixes);
    info!(
        "{} violation(s) remain after fixing, {} introduced",
        summary.residual_violations, summary.introduced_violations
    );

    Ok(AuditOutcome {
        report: AuditReport::build(&after, registry).with_fix(summary),
        fixes,
    })
}

impl ValidateOptions {
    /// Renders `run` in [`ValidateOptions::format`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded again or JSON
    /// serialization fails.
    pub fn render(&self, run: &ValidationRun) -> Result<String, Error> {
        let validator = build_validator(
            &self.cwd,
            self.rules.as_deref(),
            self.engine,
            self.config.as_ref(),
        )?;
        Ok(report::render_run(run, validator.registry(), self.format)?)
    }
}

impl AuditOptions {
    /// Renders `outcome` in [`AuditOptions::format`].
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, outcome: &AuditOutcome) -> Result<String, Error> {
        Ok(report::render(&outcome.report, self.format)?)
    }
}
