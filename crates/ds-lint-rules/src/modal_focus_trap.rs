//! Rule to require focus management inside modal regions.
//!
//! Modals, dialogs and drawers must keep keyboard focus inside while open.
//! A region passes when it, or anything inside it, is a focus-trap
//! component (`FocusTrap`, `FocusLock`, `FocusScope`) or marks initial
//! focus (`initialFocus`, `autoFocus`, `trapFocus`).
//!
//! # Configuration
//!
//! - `components`: extra component names that render a modal region

use crate::patterns::structure::{has_focus_trap, is_modal};
use crate::support::violation;
use ds_lint_core::{Category, Concern, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for modal-focus-trap.
pub const CODE: &str = "IX002";

/// Rule name for modal-focus-trap.
pub const NAME: &str = "modal-focus-trap";

/// Requires a focus trap inside modal regions.
#[derive(Debug, Clone, Default)]
pub struct ModalFocusTrap {
    components: Vec<String>,
}

impl ModalFocusTrap {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds component names that render modal regions.
    #[must_use]
    pub fn components<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components.extend(names.into_iter().map(Into::into));
        self
    }
}

impl Rule for ModalFocusTrap {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires focus trapping inside modal regions"
    }

    fn category(&self) -> Category {
        Category::Interaction
    }

    fn concern(&self) -> Concern {
        Concern::Interaction
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/modal-focus-trap.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        let markup = &ctx.markup;
        markup
            .elements
            .iter()
            .filter(|e| is_modal(e, &self.components) && !has_focus_trap(markup, e))
            .map(|e| {
                violation(
                    self,
                    ctx,
                    e.start,
                    e.name.len() + 1,
                    format!("`<{}>` does not trap focus", e.name),
                )
                .with_suggestion(Suggestion::new(
                    "Wrap the content in <FocusTrap> or set initialFocus on the region",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::testing::check;

    #[test]
    fn modal_without_trap() {
        let src = r#"<Modal open={open}><p>Sure?</p><button>OK</button></Modal>"#;
        let v = check(&ModalFocusTrap::new(), src);
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("<Modal>"));
    }

    #[test]
    fn trapped_regions_are_clean() {
        let src = r#"<Dialog open><FocusTrap><button>OK</button></FocusTrap></Dialog>
<div role="dialog"><input autoFocus /></div>
<Drawer initialFocus={ref}>x</Drawer>"#;
        assert!(check(&ModalFocusTrap::new(), src).is_empty());
    }

    #[test]
    fn configured_components() {
        let src = "<Popover open>x</Popover>";
        assert!(check(&ModalFocusTrap::new(), src).is_empty());
        assert_eq!(check(&ModalFocusTrap::new().components(["Popover"]), src).len(), 1);
    }
}
