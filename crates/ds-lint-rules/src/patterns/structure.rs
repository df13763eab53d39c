//! Structural detectors over extracted markup.

use ds_lint_core::{Element, Markup};

/// Native elements that handle keyboard input themselves.
pub const INTERACTIVE_ELEMENTS: &[&str] = &[
    "button", "a", "input", "select", "textarea", "summary", "option", "details", "label",
];

/// Keyboard handler attributes.
pub const KEY_HANDLERS: &[&str] = &["onKeyDown", "onKeyUp", "onKeyPress"];

/// Attributes that name an element for assistive technology.
pub const LABEL_ATTRIBUTES: &[&str] = &["aria-label", "aria-labelledby", "title"];

/// Components that render a modal region.
pub const MODAL_COMPONENTS: &[&str] = &["Modal", "Dialog", "Drawer", "Sheet", "AlertDialog"];

/// Components that trap focus.
pub const FOCUS_TRAP_COMPONENTS: &[&str] = &["FocusTrap", "FocusLock", "FocusScope"];

/// Attributes that show a region manages its initial focus.
pub const FOCUS_ATTRIBUTES: &[&str] = &["initialFocus", "initialFocusRef", "autoFocus", "trapFocus"];

/// Returns true for native interactive elements and for components.
///
/// Capitalised names are components; they own their keyboard behaviour.
#[must_use]
pub fn is_interactive(element: &Element) -> bool {
    INTERACTIVE_ELEMENTS.contains(&element.name.as_str())
        || element.name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Returns true if the element is hidden from assistive technology.
#[must_use]
pub fn is_hidden(element: &Element) -> bool {
    element.attr("aria-hidden").is_some_and(|a| {
        a.value.is_none()
            || a.string_value() == Some("true")
            || a.value.as_deref() == Some("{true}")
    })
}

/// Returns true if `inner` holds visible text or an expression child.
///
/// Tags are stripped; an `{expr}` child may render text, so it counts.
#[must_use]
pub fn has_accessible_content(inner: &str) -> bool {
    let mut depth = 0usize;
    let mut in_tag = false;
    for c in inner.chars() {
        match c {
            '<' if depth == 0 => in_tag = true,
            '>' if in_tag && depth == 0 => in_tag = false,
            '{' => {
                if !in_tag && depth == 0 {
                    return true;
                }
                depth += 1;
            }
            '}' => depth = depth.saturating_sub(1),
            c if !in_tag && depth == 0 && !c.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

/// What a form or interactive element is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLabel {
    /// A button or link with no text and no label attribute.
    Control,
    /// A form field with no label attribute and no `id` for a `<label>`.
    Field,
}

/// Checks whether an element needs a label it does not have.
#[must_use]
pub fn missing_label(element: &Element, content: &str) -> Option<MissingLabel> {
    if is_hidden(element) {
        return None;
    }
    match element.name.as_str() {
        "button" | "a" | "IconButton" => {
            let labelled = element.has_any_attr(LABEL_ATTRIBUTES)
                || has_accessible_content(element.inner(content));
            (!labelled).then_some(MissingLabel::Control)
        }
        "input" | "select" | "textarea" => {
            if element.attr("type").and_then(|a| a.string_value()) == Some("hidden") {
                return None;
            }
            let labelled = element.has_any_attr(&["aria-label", "aria-labelledby", "id"]);
            (!labelled).then_some(MissingLabel::Field)
        }
        _ => None,
    }
}

/// Returns true if the element is a modal region.
#[must_use]
pub fn is_modal(element: &Element, components: &[String]) -> bool {
    let name = element.name.as_str();
    if name == "dialog"
        || MODAL_COMPONENTS.contains(&name)
        || components.iter().any(|c| c == name)
    {
        return true;
    }
    element
        .attr("role")
        .and_then(|a| a.string_value())
        .is_some_and(|role| role == "dialog" || role == "alertdialog")
}

/// Returns true if a focus trap or initial-focus marker is present on the
/// region or anywhere inside it.
#[must_use]
pub fn has_focus_trap(markup: &Markup, region: &Element) -> bool {
    let marks = |e: &Element| {
        FOCUS_TRAP_COMPONENTS.contains(&e.name.as_str()) || e.has_any_attr(FOCUS_ATTRIBUTES)
    };
    marks(region) || markup.descendants(region).any(marks)
}

/// Returns true for a non-interactive element with `onClick` and no
/// keyboard handler.
#[must_use]
pub fn click_without_keyboard(element: &Element) -> bool {
    element.attr("onClick").is_some()
        && !is_interactive(element)
        && !element.has_any_attr(KEY_HANDLERS)
}
