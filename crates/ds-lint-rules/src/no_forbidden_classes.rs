//! Rule to forbid design utilities in class lists.
//!
//! # Rationale
//!
//! Colors, typography, shadows, radii and borders come from design-system
//! components and semantic tokens. A `bg-blue-500` or `text-lg` in a class
//! list bypasses both and drifts from the design language.
//!
//! # Detected Patterns
//!
//! - Palette colors: `bg-blue-500`, `text-gray-900`, `border-red-200/50`
//! - Typography scale: `text-lg`, `font-semibold`, `leading-6`
//! - Effects: `shadow-md`, `rounded-lg`
//! - Border widths: `border`, `border-t-2`
//!
//! # Fix
//!
//! The token is removed. The message names the component prop or token to
//! use instead.

use crate::patterns::classes::{classify, ClassKind};
use crate::support::{replacement, violation};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for no-forbidden-classes.
pub const CODE: &str = "DS001";

/// Rule name for no-forbidden-classes.
pub const NAME: &str = "no-forbidden-classes";

/// Forbids design utilities in class lists.
#[derive(Debug, Clone, Default)]
pub struct NoForbiddenClasses;

impl NoForbiddenClasses {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoForbiddenClasses {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids color, typography, effect and border utilities in class lists"
    }

    fn category(&self) -> Category {
        Category::Utilities
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/no-forbidden-classes.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        let mut violations = Vec::new();
        for attr in &ctx.markup.class_attrs {
            for token in attr.tokens() {
                let ClassKind::Forbidden(forbidden) = classify(token.text) else {
                    continue;
                };
                violations.push(
                    violation(
                        self,
                        ctx,
                        token.offset,
                        token.text.len(),
                        format!(
                            "`{}` sets {} outside the design system",
                            token.text, forbidden.category
                        ),
                    )
                    .with_category(forbidden.category)
                    .with_suggestion(Suggestion::with_fix(
                        forbidden.replacement,
                        replacement(ctx, token.offset, token.text, ""),
                    )),
                );
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::testing::{check, check_as, fix_all};

    #[test]
    fn flags_design_utilities() {
        let src = r#"<div className="flex bg-blue-500 text-lg p-4">x</div>"#;
        let v = check(&NoForbiddenClasses::new(), src);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].category, Some(Category::Colors));
        assert_eq!(v[0].location.column, 21);
        assert_eq!(v[1].category, Some(Category::Typography));
        assert!(v[0].replacement().is_some_and(|r| r.is_removal()));
    }

    #[test]
    fn clean_file_has_no_violations() {
        let src = r#"<div className="flex items-center gap-4 card">x</div>"#;
        assert!(check(&NoForbiddenClasses::new(), src).is_empty());
    }

    #[test]
    fn skips_interpolated_tokens() {
        let src = r#"<div className={`bg-${tone}-500 p-4`}>x</div>"#;
        assert!(check(&NoForbiddenClasses::new(), src).is_empty());
    }

    #[test]
    fn unsupported_files_are_ignored() {
        let src = r#"<div className="bg-blue-500">x</div>"#;
        assert!(check_as(&NoForbiddenClasses::new(), "README.md", src).is_empty());
    }

    #[test]
    fn fix_removes_tokens_and_is_idempotent() {
        let rule = NoForbiddenClasses::new();
        let src = r#"<div className="flex bg-blue-500 shadow-md p-4">x</div>"#;
        let fixed = fix_all(&rule, src);
        assert_eq!(fixed, r#"<div className="flex p-4">x</div>"#);
        assert!(check(&rule, &fixed).is_empty());

        let v = check(&rule, src);
        let outcome = rule.autofix(&fixed, &v[0]);
        assert!(!outcome.fixed);
    }
}
