//! # ds-lint-core
//!
//! Core framework for design-system compliance linting.
//!
//! This crate provides the foundational traits and types:
//!
//! - [`Rule`] trait and the [`RuleRegistry`] that assigns severities
//! - [`Markup`] model and the standalone [`TextExtractor`]
//! - [`Scanner`] and [`Validator`] for running rules over a tree
//! - the [`fix`] engine that rewrites offending text in place
//! - [`AuditReport`] and its renderings
//!
//! ## Example
//!
//! ```ignore
//! use ds_lint_core::{RuleRegistry, Validator};
//!
//! let validator = Validator::builder()
//!     .root("./src")
//!     .registry(RuleRegistry::new().with(MyRule))
//!     .build()?;
//!
//! let run = validator.validate();
//! println!("{}", run.to_json()?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod registry;
mod result;
mod rule;
mod scanner;
mod types;
mod validator;

pub mod fix;
pub mod markup;
pub mod report;

/// Utility modules for rule implementations.
pub mod utils;

pub use config::{Config, ConfigError, RuleConfig, ScannerConfig};
pub use context::{is_supported_path, line_col, FileContext, SUPPORTED_EXTENSIONS};
pub use fix::{Edit, FixLog};
pub use markup::{Attribute, ClassAttr, ClassToken, Element, Markup, MarkupExtractor, TextExtractor};
pub use registry::{Registration, RuleRegistry};
pub use report::{AuditReport, FixSummary, FlatViolation, Recommendation, ReportFormat, Summary};
pub use result::{FileResult, RuleResult, ValidationRun};
pub use rule::{FixOutcome, Rule, RuleBox};
pub use scanner::{Scanner, PRUNED_DIRS};
pub use types::{
    Category, Concern, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::{AllowCheck, Allowances};
pub use validator::{Validator, ValidatorBuilder, ValidatorError};
