//! # ds-lint
//!
//! Design-system compliance linter for React/TSX code bases.
//!
//! This is the main facade crate. It re-exports the core framework, the
//! built-in rules and the structural extractor, and provides the two entry
//! points everything else is built on:
//!
//! - [`validate`] scans a directory and returns the per-file results
//! - [`audit`] builds an [`AuditReport`], optionally fixing what it can
//!   first and reporting the post-fix state
//!
//! ## Configuration
//!
//! Unless options carry a [`Config`], `ds-lint.toml` or `.ds-lint.toml` in
//! the scanned directory is used:
//!
//! ```toml
//! preset = "recommended"
//!
//! [rules.no-raw-colors]
//! severity = "warning"
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use ds_lint::{audit, validate, AuditOptions, Engine, ValidateOptions};
//!
//! let run = validate(&ValidateOptions {
//!     cwd: "./web".into(),
//!     rules: Some("no-raw-colors,DS003".into()),
//!     engine: Engine::Tree,
//!     ..ValidateOptions::default()
//! })?;
//!
//! let outcome = audit(&AuditOptions {
//!     cwd: "./web".into(),
//!     fix: true,
//!     ..AuditOptions::default()
//! })?;
//! println!("{}", outcome.report.summary.total_violations);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export core types and traits
pub use ds_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use ds_lint_rules::*;
}

pub use ds_lint_ts::StructuralExtractor;

mod options;
mod runner;

pub use options::{AuditOptions, Engine, ValidateOptions};
pub use runner::{audit, discover_config, validate, AuditOutcome, Error, CONFIG_CANDIDATES};
