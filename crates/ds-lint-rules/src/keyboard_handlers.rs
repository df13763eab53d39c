//! Rule to require keyboard support for click handlers.
//!
//! A `<div onClick>` cannot be reached or activated from the keyboard.
//! Native interactive elements and design-system components handle this
//! themselves and are not checked.

use crate::patterns::structure::click_without_keyboard;
use crate::support::violation;
use ds_lint_core::{Category, Concern, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for keyboard-handlers.
pub const CODE: &str = "IX001";

/// Rule name for keyboard-handlers.
pub const NAME: &str = "keyboard-handlers";

/// Requires a keyboard handler next to `onClick` on non-interactive elements.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHandlers;

impl KeyboardHandlers {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for KeyboardHandlers {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires keyboard handlers on clickable non-interactive elements"
    }

    fn category(&self) -> Category {
        Category::Interaction
    }

    fn concern(&self) -> Concern {
        Concern::Interaction
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/keyboard-handlers.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        ctx.markup
            .elements
            .iter()
            .filter(|e| click_without_keyboard(e))
            .filter_map(|e| {
                let click = e.attr("onClick")?;
                Some(
                    violation(
                        self,
                        ctx,
                        click.offset,
                        click.name.len(),
                        format!("`<{}>` handles clicks but not the keyboard", e.name),
                    )
                    .with_suggestion(Suggestion::new(
                        "Use a <button>, or add role, tabIndex and an onKeyDown handler",
                    )),
                )
            })
            .collect()
    }
}
