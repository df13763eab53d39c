//! Rule to keep spacing values in styles on the 4px grid.
//!
//! Covers style objects (`{ padding: 10 }`, `{ marginTop: "6px" }`) and
//! CSS text in string and template literals (`` `gap: 10px;` ``). Every
//! part of a shorthand is checked on its own; each off-grid part is its
//! own finding with its own fix.

use crate::patterns::compile;
use crate::patterns::spacing::{check_shorthand, is_spacing_property, SpacingCheck, GRID_PX};
use crate::support::{replacement, violation, violation_at};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Rule code for spacing-grid-values.
pub const CODE: &str = "DS006";

/// Rule name for spacing-grid-values.
pub const NAME: &str = "spacing-grid-values";

static PROPERTY: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?m)(?:^|[\s{;,(`"'])([A-Za-z][A-Za-z-]*)\s*:"#));

/// Keeps style spacing values on the grid.
#[derive(Debug, Clone, Default)]
pub struct SpacingGridValues;

impl SpacingGridValues {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Finds the value following the property whose colon ends at `after`.
fn value_range(ctx: &FileContext, name_start: usize, after: usize) -> Option<Range<usize>> {
    let content = ctx.content;
    let bytes = content.as_bytes();

    if let Some(literal) = ctx.lexed.literal_at(name_start) {
        // CSS text: up to the end of the declaration or of the static part.
        let quasi = literal.quasis.iter().find(|q| q.contains(&name_start))?;
        let end = content[after..quasi.end]
            .find(&[';', '}', '\n'][..])
            .map_or(quasi.end, |p| after + p);
        return Some(after..end);
    }

    let start = after + content[after..].len() - content[after..].trim_start().len();
    match bytes.get(start)? {
        b'"' | b'\'' | b'`' => {
            let literal = ctx.lexed.literals.iter().find(|l| l.start == start)?;
            (literal.quasis.len() == 1).then(|| literal.inner())
        }
        b if b.is_ascii_digit() || *b == b'-' || *b == b'.' => {
            let len = content[start..]
                .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
                .unwrap_or(content.len() - start);
            (len > 0).then_some(start..start + len)
        }
        _ => None,
    }
}

impl Rule for SpacingGridValues {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires padding, margin and gap values to sit on the 4px grid"
    }

    fn category(&self) -> Category {
        Category::Spacing
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/spacing-grid-values.md")
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
        let mut violations = Vec::new();

        for caps in PROPERTY.captures_iter(ctx.content) {
            let (Some(name), Some(whole)) = (caps.get(1), caps.get(0)) else {
                continue;
            };
            if !is_spacing_property(name.as_str()) || ctx.lexed.in_comment(name.start()) {
                continue;
            }
            let Some(range) = value_range(ctx, name.start(), whole.end()) else {
                continue;
            };
            let value = &ctx.content[range.clone()];

            for part in check_shorthand(value) {
                let offset = range.start + part.range.start;
                match part.check {
                    SpacingCheck::Valid | SpacingCheck::Unsupported => {}
                    SpacingCheck::Hairline => violations.push(violation_at(
                        self,
                        ctx,
                        offset,
                        part.text.len(),
                        Severity::Info,
                        format!(
                            "`{}: {}` is a 1px hairline; check it is meant as spacing",
                            name.as_str(),
                            part.text
                        ),
                    )),
                    SpacingCheck::OffGrid { nearest } => {
                        let nearest = nearest.to_string();
                        violations.push(
                            violation(
                                self,
                                ctx,
                                offset,
                                part.text.len(),
                                format!(
                                    "`{}: {}` is off the {GRID_PX}px spacing grid; nearest is `{nearest}`",
                                    name.as_str(),
                                    part.text
                                ),
                            )
                            .with_suggestion(Suggestion::with_fix(
                                format!("Use `{nearest}`"),
                                replacement(ctx, offset, part.text, nearest),
                            )),
                        );
                    }
                }
            }
        }
        violations
    }
}
