//! Rule to flag utility-framework classes the design system does not ship.
//!
//! Variant prefixes (`hover:`, `md:`), arbitrary values (`w-[320px]`),
//! motion, effect and sizing utilities only work with a utility-framework
//! build the design system does not provide. They silently do nothing.

use crate::patterns::classes::{classify, ClassKind};
use crate::support::{replacement, violation};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for no-tailwind-only-classes.
pub const CODE: &str = "DS002";

/// Rule name for no-tailwind-only-classes.
pub const NAME: &str = "no-tailwind-only-classes";

/// Flags utility-framework classes.
#[derive(Debug, Clone, Default)]
pub struct NoTailwindOnlyClasses;

impl NoTailwindOnlyClasses {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoTailwindOnlyClasses {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags utility-framework classes that have no effect without that framework"
    }

    fn category(&self) -> Category {
        Category::Utilities
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/no-tailwind-only-classes.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        ctx.markup
            .class_attrs
            .iter()
            .flat_map(|attr| attr.tokens())
            .filter_map(|token| match classify(token.text) {
                ClassKind::TailwindLike(kind) => Some(
                    violation(
                        self,
                        ctx,
                        token.offset,
                        token.text.len(),
                        format!("`{}` is a {}", token.text, kind.description),
                    )
                    .with_suggestion(Suggestion::with_fix(
                        "Use a design-system component or prop instead",
                        replacement(ctx, token.offset, token.text, ""),
                    )),
                ),
                _ => None,
            })
            .collect()
    }
}
