//! Entry-point options.

use ds_lint_core::{Config, MarkupExtractor, ReportFormat, TextExtractor};
use ds_lint_ts::StructuralExtractor;
use std::fmt;
use std::path::PathBuf;

/// Markup extraction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Standalone tag scanner.
    #[default]
    Text,
    /// Tree-sitter TSX/TypeScript parse.
    Tree,
}

impl Engine {
    /// Creates the extractor for this engine.
    #[must_use]
    pub fn extractor(self) -> Box<dyn MarkupExtractor> {
        match self {
            Self::Text => Box::new(TextExtractor::new()),
            Self::Tree => Box::new(StructuralExtractor::new()),
        }
    }
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "tree" | "tree-sitter" => Ok(Self::Tree),
            other => Err(format!("unknown engine '{other}'")),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// Options for [`validate`](crate::validate).
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Directory to scan.
    pub cwd: PathBuf,
    /// Shape [`ValidateOptions::render`] produces.
    pub format: ReportFormat,
    /// Comma-separated rule names or codes; `None` runs every registered rule.
    pub rules: Option<String>,
    /// Markup engine.
    pub engine: Engine,
    /// Configuration; `None` discovers one in `cwd`.
    pub config: Option<Config>,
}

/// Options for [`audit`](crate::audit).
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Directory to scan.
    pub cwd: PathBuf,
    /// Apply auto-fixes, then report the post-fix state.
    pub fix: bool,
    /// Shape [`AuditOptions::render`] produces.
    pub format: ReportFormat,
    /// Comma-separated rule names or codes; `None` runs every registered rule.
    pub rules: Option<String>,
    /// Markup engine.
    pub engine: Engine,
    /// Configuration; `None` discovers one in `cwd`.
    pub config: Option<Config>,
}
