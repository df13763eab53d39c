//! Rule to keep spacing utilities on the 4px grid.
//!
//! Spacing utility values are pixels: `p-8` is 8px of padding. Values must
//! be multiples of 4 up to 32. `p-px` and `p-1` are hairlines and only
//! noted, matching `padding: 1px` in style values.

use crate::patterns::classes::{spacing_class, SpacingScale};
use crate::patterns::spacing::{nearest_grid_px, on_grid_px, GRID_PX};
use crate::support::{replacement, violation, violation_at};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for spacing-grid-classes.
pub const CODE: &str = "DS003";

/// Rule name for spacing-grid-classes.
pub const NAME: &str = "spacing-grid-classes";

/// Keeps spacing utilities on the grid.
#[derive(Debug, Clone, Default)]
pub struct SpacingGridClasses;

impl SpacingGridClasses {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SpacingGridClasses {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires spacing utilities to use 4px grid values"
    }

    fn category(&self) -> Category {
        Category::Spacing
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/spacing-grid-classes.md")
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
                let Some(class) = spacing_class(token.text) else {
                    continue;
                };
                match class.scale {
                    SpacingScale::Auto => {}
                    SpacingScale::Px(px) if on_grid_px(px) => {}
                    SpacingScale::Px(px) => {
                        let nearest = class.with_px(nearest_grid_px(f64::from(px)));
                        violations.push(
                            violation(
                                self,
                                ctx,
                                token.offset,
                                token.text.len(),
                                format!(
                                    "`{}` is off the {GRID_PX}px spacing grid; nearest is `{nearest}`",
                                    token.text
                                ),
                            )
                            .with_suggestion(Suggestion::with_fix(
                                format!("Use `{nearest}`"),
                                replacement(ctx, token.offset, token.text, nearest.clone()),
                            )),
                        );
                    }
                    SpacingScale::Hairline => violations.push(violation_at(
                        self,
                        ctx,
                        token.offset,
                        token.text.len(),
                        Severity::Info,
                        format!("`{}` is a 1px hairline; check it is meant as spacing", token.text),
                    )),
                }
            }
        }
        violations
    }
}
