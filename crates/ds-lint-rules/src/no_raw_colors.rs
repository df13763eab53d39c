//! Rule to forbid raw color literals.
//!
//! # Rationale
//!
//! A hex, rgb, hsl or named color hard-codes a visual decision the design
//! system expresses through semantic tokens. Which token replaces it
//! depends on what the color is for, so findings carry a list of options
//! rather than an automatic fix.
//!
//! # Detected Patterns
//!
//! - String and template literals: `"#fff"`, `` `border: 1px solid ${w} #ccc` ``
//! - JSX attributes: `fill="#000"`, `color="red"`
//! - Style objects: `{ backgroundColor: 'rgba(0,0,0,.4)' }`
//!
//! Named colors count only where a color is expected: a literal assigned
//! to a color-bearing property, or a color declaration in CSS text.
//!
//! # Allowed Patterns
//!
//! - `transparent`, `currentColor`, `inherit` and the other CSS keywords
//! - `var(--token)` references, including inside `rgb()`
//! - Values of `href`, `id`, `key`, `src`, `alt`, `title`, `aria-*` and
//!   `data-*` attributes, and class lists

use crate::patterns::colors::{
    classify_color, find_colors, find_named_in_css, is_color_property, remediation, ColorKind,
};
use crate::support::violation;
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};
use std::ops::Range;

/// Rule code for no-raw-colors.
pub const CODE: &str = "DS004";

/// Rule name for no-raw-colors.
pub const NAME: &str = "no-raw-colors";

/// Attributes whose values are never colors.
const NON_COLOR_ATTRIBUTES: &[&str] = &[
    "href", "to", "id", "key", "src", "alt", "title", "className", "class", "htmlFor", "name",
];

/// Forbids raw color literals.
#[derive(Debug, Clone, Default)]
pub struct NoRawColors;

impl NoRawColors {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn report(&self, ctx: &FileContext, offset: usize, len: usize, kind: ColorKind) -> Violation {
        let text = &ctx.content[offset..offset + len];
        violation(
            self,
            ctx,
            offset,
            len,
            format!("Raw {} `{text}`; use a semantic color token", kind.label()),
        )
        .with_suggestion(
            Suggestion::new("Replace with the semantic token that matches the color's purpose")
                .with_alternatives(remediation()),
        )
    }
}

fn skipped_ranges(ctx: &FileContext) -> Vec<Range<usize>> {
    ctx.markup
        .elements
        .iter()
        .flat_map(|e| e.attributes.iter())
        .filter(|a| {
            NON_COLOR_ATTRIBUTES.contains(&a.name.as_str())
                || a.name.starts_with("aria-")
                || a.name.starts_with("data-")
        })
        .filter_map(|a| {
            let start = a.value_offset?;
            Some(start..start + a.value.as_ref()?.len())
        })
        .collect()
}

/// Returns the property or attribute name a literal at `start` is assigned
/// to (`color: "red"`, `fill="red"`).
fn assigned_property(content: &str, start: usize) -> Option<&str> {
    let before = content[..start].trim_end();
    let before = before
        .strip_suffix(':')
        .or_else(|| before.strip_suffix('='))?
        .trim_end();
    let name_start = before
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .map_or(0, |i| i + 1);
    let name = &before[name_start..];
    (!name.is_empty()).then_some(name)
}

impl Rule for NoRawColors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids hex, rgb, hsl and named color literals"
    }

    fn category(&self) -> Category {
        Category::Colors
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/no-raw-colors.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        let skipped = skipped_ranges(ctx);
        let mut violations = Vec::new();

        for literal in &ctx.lexed.literals {
            if ctx.lexed.in_comment(literal.start)
                || skipped.iter().any(|r| r.contains(&literal.start))
            {
                continue;
            }
            for quasi in &literal.quasis {
                let text = &ctx.content[quasi.clone()];
                for m in find_colors(text).into_iter().chain(find_named_in_css(text)) {
                    let offset = quasi.start + m.range.start;
                    violations.push(self.report(ctx, offset, m.range.len(), m.kind));
                }
            }
            if literal.quasis.len() == 1 {
                let inner = literal.inner();
                let value = &ctx.content[inner.clone()];
                let trimmed = value.trim_start();
                if classify_color(value) == Some(ColorKind::Named)
                    && assigned_property(ctx.content, literal.start).is_some_and(is_color_property)
                {
                    let offset = inner.start + (value.len() - trimmed.len());
                    let len = trimmed.trim_end().len();
                    violations.push(self.report(ctx, offset, len, ColorKind::Named));
                }
            }
        }

        violations.sort_by_key(|v| v.location.offset);
        violations
    }
}
