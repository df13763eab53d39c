//! Rule trait for defining design-system rules.

use crate::context::FileContext;
use crate::fix::{apply_edits, resolve, Edit};
use crate::types::{Category, Concern, Severity, Violation};

/// A per-file design-system rule.
///
/// Rules are stateless: `check` sees one file's text and extracted markup,
/// never another rule's output.
///
/// # Example
///
/// ```ignore
/// use ds_lint_core::{Category, FileContext, Rule, Violation};
///
/// pub struct NoInlineStyle;
///
/// impl Rule for NoInlineStyle {
///     fn name(&self) -> &'static str { "no-inline-style" }
///     fn code(&self) -> &'static str { "DS100" }
///     fn category(&self) -> Category { Category::Utilities }
///
///     fn check(&self, ctx: &FileContext) -> Vec<Violation> {
///         ctx.markup
///             .elements
///             .iter()
///             .filter_map(|e| e.attr("style"))
///             .map(|a| Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(a.offset, a.name.len()),
///                 "Inline style",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-raw-colors").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DS004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the policy area this rule enforces.
    fn category(&self) -> Category;

    /// Returns the registry partition of this rule.
    fn concern(&self) -> Concern {
        Concern::Styling
    }

    /// Returns a pointer into the design-system documentation.
    fn doc_ref(&self) -> Option<&'static str> {
        None
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether violations carrying a replacement may be rewritten.
    fn fixable(&self) -> bool {
        false
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// Unsupported file types yield no violations.
    fn check(&self, ctx: &FileContext) -> Vec<Violation>;

    /// Resolves the edit for `violation` against the current `content`.
    ///
    /// Returns `None` when the rule cannot fix it or the offending text is
    /// no longer where the violation says it was.
    fn edit(&self, content: &str, violation: &Violation) -> Option<Edit> {
        if !self.fixable() {
            return None;
        }
        resolve(content, violation.replacement()?)
    }

    /// Applies the fix for one violation.
    fn autofix(&self, content: &str, violation: &Violation) -> FixOutcome {
        match self.edit(content, violation) {
            Some(edit) => {
                let (fixed, applied) = apply_edits(content, vec![edit]);
                FixOutcome {
                    fixed: !applied.is_empty() && fixed != content,
                    content: fixed,
                }
            }
            None => FixOutcome::unchanged(content),
        }
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Result of [`Rule::autofix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Whether `content` differs from the input.
    pub fixed: bool,
    /// The resulting text.
    pub content: String,
}

impl FixOutcome {
    /// An outcome that leaves `content` as it was.
    #[must_use]
    pub fn unchanged(content: &str) -> Self {
        Self {
            fixed: false,
            content: content.to_string(),
        }
    }
}
