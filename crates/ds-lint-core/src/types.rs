//! Core types for design-system violations.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail validation.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Policy area a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Raw palette colors, color utilities.
    Colors,
    /// Font sizes, weights, line heights.
    Typography,
    /// Padding, margin, gap.
    Spacing,
    /// Shadows, radii and other visual effects.
    Effects,
    /// Border widths and styles.
    Borders,
    /// Design-token (custom property) usage.
    Tokens,
    /// Utility classes the design system does not ship.
    Utilities,
    /// Module import paths.
    Imports,
    /// Keyboard and focus behaviour.
    Interaction,
    /// Labels, alternative text.
    Accessibility,
}

impl Category {
    /// Returns the lowercase identifier of this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::Effects => "effects",
            Self::Borders => "borders",
            Self::Tokens => "tokens",
            Self::Utilities => "utilities",
            Self::Imports => "imports",
            Self::Interaction => "interaction",
            Self::Accessibility => "accessibility",
        }
    }

    /// Whether fixing this category requires knowing what a color is *for*.
    ///
    /// Such findings are never auto-fixed.
    #[must_use]
    pub fn is_semantically_ambiguous(self) -> bool {
        matches!(self, Self::Colors | Self::Tokens)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which partition of the registry a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concern {
    /// Styling compliance (classes, colors, tokens, spacing, imports).
    Styling,
    /// Interaction patterns (keyboard, focus).
    Interaction,
    /// Accessibility.
    Accessibility,
}

impl std::fmt::Display for Concern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Styling => write!(f, "styling"),
            Self::Interaction => write!(f, "interaction"),
            Self::Accessibility => write!(f, "accessibility"),
        }
    }
}

/// Source code location.
///
/// `line` is 1-based and `column` is the 0-based byte column within that
/// line. Both reference the text the scan pass read, never a fixed copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the scanned root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within the line).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Deterministic rewrite of the offending text, if the rule can make one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Replacement>,
    /// Manual-fix options for findings that cannot be rewritten safely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl Suggestion {
    /// Creates a new suggestion without automatic fix.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
            alternatives: Vec::new(),
        }
    }

    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
            alternatives: Vec::new(),
        }
    }

    /// Attaches manual-fix alternatives.
    #[must_use]
    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives
            .extend(alternatives.into_iter().map(Into::into));
        self
    }
}

/// An automatic text replacement.
///
/// `original` is the exact text found at `location` when the violation was
/// raised. The autofix engine only rewrites text that still matches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Location to replace.
    pub location: Location,
    /// Text expected at the location.
    pub original: String,
    /// New text to insert. Empty means removal.
    pub new_text: String,
}

impl Replacement {
    /// Creates a new replacement.
    #[must_use]
    pub fn new(
        location: Location,
        original: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            location,
            original: original.into(),
            new_text: new_text.into(),
        }
    }

    /// Creates a replacement that deletes `original`.
    #[must_use]
    pub fn removal(location: Location, original: impl Into<String>) -> Self {
        Self::new(location, original, "")
    }

    /// Returns true if this replacement deletes text.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.new_text.is_empty()
    }
}

/// A design-system violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DS001").
    pub code: String,
    /// Rule name (e.g., "no-forbidden-classes").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Category of this finding, when it differs per finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
    /// Reference to design-system documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            category: None,
            location,
            message: message.into(),
            suggestion: None,
            doc_ref: None,
        }
    }

    /// Adds a documentation reference to this violation.
    #[must_use]
    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Sets the category of this finding.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns the automatic replacement, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&Replacement> {
        self.suggestion.as_ref().and_then(|s| s.replacement.as_ref())
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
            for alternative in &suggestion.alternatives {
                let _ = writeln!(output, "  = try: {alternative}");
            }
        }
        if let Some(doc_ref) = &self.doc_ref {
            let _ = writeln!(output, "  = see: {doc_ref}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )?;
        if let Some(doc_ref) = &self.doc_ref {
            write!(f, " (see: {doc_ref})")?;
        }
        Ok(())
    }
}

/// A violation rendered as a miette diagnostic with its source snippet.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` against the file text it was found in.
    #[must_use]
    pub fn new(violation: &Violation, source: &str) -> Self {
        let offset = violation.location.offset.min(source.len());
        let length = violation
            .location
            .length
            .min(source.len().saturating_sub(offset));
        Self {
            message: format!("[{}] {}", violation.code, violation.message),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            source_code: NamedSource::new(
                violation.location.file.display().to_string(),
                source.to_string(),
            ),
            span: SourceSpan::from((offset, length)),
            label_message: violation.rule.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "DS004",
            "no-raw-colors",
            severity,
            Location::new(PathBuf::from("src/Card.tsx"), 12, 18),
            "Raw hex color `#fff`",
        )
    }

    #[test]
    fn severity_orders_info_warning_error() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }

    #[test]
    fn colors_and_tokens_are_ambiguous() {
        assert!(Category::Colors.is_semantically_ambiguous());
        assert!(Category::Tokens.is_semantically_ambiguous());
        assert!(!Category::Spacing.is_semantically_ambiguous());
    }

    #[test]
    fn violation_new_has_no_doc_ref() {
        let v = make_violation(Severity::Error);
        assert!(v.doc_ref.is_none());
        assert!(v.replacement().is_none());
    }

    #[test]
    fn violation_format_includes_alternatives_and_doc_ref() {
        let v = make_violation(Severity::Error)
            .with_suggestion(
                Suggestion::new("Use a semantic color token")
                    .with_alternatives(["var(--surface-neutral-primary)"]),
            )
            .with_doc_ref("docs/colors.md");
        let formatted = v.format();
        assert!(formatted.contains("= help: Use a semantic color token"));
        assert!(formatted.contains("= try: var(--surface-neutral-primary)"));
        assert!(formatted.contains("= see: docs/colors.md"));
    }

    #[test]
    fn violation_display_is_compact() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "src/Card.tsx:12:18: warning [DS004] Raw hex color `#fff`"
        );
    }

    #[test]
    fn removal_replacement_has_empty_text() {
        let r = Replacement::removal(Location::new(PathBuf::from("a.tsx"), 1, 0), "bg-red-500");
        assert!(r.is_removal());
        assert_eq!(r.original, "bg-red-500");
    }

    #[test]
    fn diagnostic_clamps_span_to_source() {
        let v = make_violation(Severity::Error);
        let mut v = v;
        v.location = v.location.with_span(100, 10);
        let diag = ViolationDiagnostic::new(&v, "short");
        assert_eq!(diag.span.offset(), 5);
        assert_eq!(diag.span.len(), 0);
    }
}
