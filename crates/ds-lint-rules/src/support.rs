//! Helpers shared by the rule modules.

use ds_lint_core::{FileContext, Replacement, Rule, Severity, Violation};

/// Builds a violation at `offset..offset + length` at the rule's default
/// severity, carrying its category and documentation link.
pub(crate) fn violation(
    rule: &dyn Rule,
    ctx: &FileContext,
    offset: usize,
    length: usize,
    message: impl Into<String>,
) -> Violation {
    violation_at(rule, ctx, offset, length, rule.default_severity(), message)
}

/// Like [`violation`] with an explicit severity.
pub(crate) fn violation_at(
    rule: &dyn Rule,
    ctx: &FileContext,
    offset: usize,
    length: usize,
    severity: Severity,
    message: impl Into<String>,
) -> Violation {
    let v = Violation::new(
        rule.code(),
        rule.name(),
        severity,
        ctx.location(offset, length),
        message,
    )
    .with_category(rule.category());
    match rule.doc_ref() {
        Some(doc) => v.with_doc_ref(doc),
        None => v,
    }
}

/// Builds a replacement of `original` found at `offset`.
pub(crate) fn replacement(
    ctx: &FileContext,
    offset: usize,
    original: &str,
    new_text: impl Into<String>,
) -> Replacement {
    Replacement::new(ctx.location(offset, original.len()), original, new_text)
}
