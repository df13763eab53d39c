//! Rule to require accessible names on controls and form fields.

use crate::patterns::structure::{missing_label, MissingLabel};
use crate::support::violation;
use ds_lint_core::{Category, Concern, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for accessible-labels.
pub const CODE: &str = "A11Y001";

/// Rule name for accessible-labels.
pub const NAME: &str = "accessible-labels";

/// Requires buttons, links and form fields to have an accessible name.
#[derive(Debug, Clone, Default)]
pub struct AccessibleLabels;

impl AccessibleLabels {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AccessibleLabels {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires accessible names on buttons, links and form fields"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn concern(&self) -> Concern {
        Concern::Accessibility
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/accessible-labels.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        ctx.markup
            .elements
            .iter()
            .filter_map(|e| {
                let (message, help) = match missing_label(e, ctx.content)? {
                    MissingLabel::Control => (
                        format!("`<{}>` has no text and no accessible label", e.name),
                        "Add visible text or an aria-label",
                    ),
                    MissingLabel::Field => (
                        format!("`<{}>` has no accessible label", e.name),
                        "Add an aria-label, or an id referenced by a <label htmlFor>",
                    ),
                };
                Some(
                    violation(self, ctx, e.start, e.name.len() + 1, message)
                        .with_suggestion(Suggestion::new(help)),
                )
            })
            .collect()
    }
}
