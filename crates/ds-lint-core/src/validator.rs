//! Validation orchestrator.

use crate::config::{Config, ConfigError};
use crate::context::FileContext;
use crate::markup::{MarkupExtractor, TextExtractor};
use crate::registry::{Registration, RuleRegistry};
use crate::result::{FileResult, RuleResult, ValidationRun};
use crate::scanner::Scanner;
use crate::types::{Severity, Violation};
use crate::utils::{AllowCheck, Allowances};

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur before or around validation.
///
/// Per-file and per-rule failures are not errors; they are recorded in the
/// [`ValidationRun`].
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// IO error resolving the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root is not a directory.
    #[error("Not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    root: Option<PathBuf>,
    registry: Option<RuleRegistry>,
    extractor: Option<Box<dyn MarkupExtractor>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to validate.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the markup extraction engine (default: [`TextExtractor`]).
    #[must_use]
    pub fn extractor(mut self, extractor: Box<dyn MarkupExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration. Its scanner excludes are merged in.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory or an exclude
    /// pattern is invalid.
    pub fn build(self) -> Result<Validator, ValidatorError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.is_dir() {
            return Err(ValidatorError::InvalidRoot(root));
        }

        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.scanner.exclude.clone());
        }

        Ok(Validator {
            root,
            registry: self.registry.unwrap_or_default(),
            extractor: self
                .extractor
                .unwrap_or_else(|| Box::new(TextExtractor::new())),
            scanner: Scanner::new(&exclude_patterns)?,
        })
    }
}

/// Runs registered rules over files and collects a [`ValidationRun`].
///
/// Use [`Validator::builder()`] to construct an instance.
pub struct Validator {
    root: PathBuf,
    registry: RuleRegistry,
    extractor: Box<dyn MarkupExtractor>,
    scanner: Scanner,
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Returns the root directory being validated.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the registry the validator runs.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Returns the markup engine name.
    #[must_use]
    pub fn engine(&self) -> &'static str {
        self.extractor.engine()
    }

    /// Returns the files a [`Validator::validate`] call would check.
    #[must_use]
    pub fn discover_files(&self) -> Vec<PathBuf> {
        self.scanner.scan(&self.root)
    }

    /// Scans the root and validates every file found.
    #[must_use]
    pub fn validate(&self) -> ValidationRun {
        info!(
            "Starting validation at {:?} ({} rules, {} engine)",
            self.root,
            self.registry.len(),
            self.engine()
        );
        let files = self.discover_files();
        info!("Found {} files to validate", files.len());
        self.run(&files)
    }

    /// Validates the given files.
    ///
    /// Each file is read once; unreadable files are recorded with their
    /// error and the batch continues.
    #[must_use]
    pub fn run(&self, files: &[PathBuf]) -> ValidationRun {
        let mut run = ValidationRun::new(&self.root);

        for path in files {
            run.files_scanned += 1;
            let relative = path
                .strip_prefix(&self.root)
                .map_or_else(|_| path.clone(), Path::to_path_buf);

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    run.results.insert(
                        relative,
                        FileResult::Error {
                            error: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            let rules = self.check_source(path, &content);
            if !rules.is_empty() {
                run.results.insert(relative, FileResult::Rules(rules));
            }
        }

        let (errors, warnings, infos) = run.count_by_severity();
        info!(
            "Validation complete: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, run.files_scanned
        );
        run
    }

    /// Runs every registration over one file's text.
    ///
    /// Only rules that found something or failed get an entry.
    #[must_use]
    pub fn check_source(&self, path: &Path, content: &str) -> BTreeMap<String, RuleResult> {
        debug!("Validating: {}", path.display());
        let ctx = FileContext::new(path, content, &self.root, self.extractor.as_ref());
        let allowances = Allowances::parse(content);
        let mut results = BTreeMap::new();

        for registration in self.registry.iter() {
            let rule = &registration.rule;
            let outcome = catch_unwind(AssertUnwindSafe(|| rule.check(&ctx)));
            let result = match outcome {
                Ok(violations) => {
                    let violations = registration.apply(violations);
                    let violations = apply_allowances(registration, &allowances, violations);
                    if violations.is_empty() {
                        continue;
                    }
                    RuleResult {
                        rule: rule.name().to_string(),
                        code: rule.code().to_string(),
                        severity: registration.severity,
                        violations,
                        error: None,
                    }
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(
                        "Rule {} failed on {}: {}",
                        rule.name(),
                        path.display(),
                        message
                    );
                    RuleResult {
                        rule: rule.name().to_string(),
                        code: rule.code().to_string(),
                        severity: registration.severity,
                        violations: Vec::new(),
                        error: Some(message),
                    }
                }
            };
            results.insert(rule.name().to_string(), result);
        }

        results
    }
}

/// Drops allowed violations. An error allowed without a required reason is
/// replaced by a warning about the directive.
fn apply_allowances(
    registration: &Registration,
    allowances: &Allowances,
    violations: Vec<Violation>,
) -> Vec<Violation> {
    if allowances.is_empty() {
        return violations;
    }
    let rule = &registration.rule;
    violations
        .into_iter()
        .filter_map(|v| {
            match allowances.check(v.location.line, rule.name(), rule.code()) {
                AllowCheck::Denied => Some(v),
                AllowCheck::Allowed { reason } => {
                    if reason.is_none()
                        && rule.requires_allow_reason()
                        && v.severity == Severity::Error
                    {
                        let message = format!(
                            "allow directive for `{}` missing required reason",
                            rule.name()
                        );
                        Some(Violation::new(
                            v.code,
                            v.rule,
                            Severity::Warning,
                            v.location,
                            message,
                        ))
                    } else {
                        debug!("Allowed {} at line {}", rule.name(), v.location.line);
                        None
                    }
                }
            }
        })
        .collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("rule panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("rule panicked: {s}")
    } else {
        "rule panicked".to_string()
    }
}
