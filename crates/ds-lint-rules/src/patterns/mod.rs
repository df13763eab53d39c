//! Reusable classifiers the rules are built from.
//!
//! Each module answers one question about a piece of text (is this class a
//! design utility, is this literal a color, is this value on the grid) and
//! knows nothing about violations. Rules turn the answers into findings.

pub mod classes;
pub mod colors;
pub mod imports;
pub mod spacing;
pub mod structure;
pub mod tokens;

use regex::Regex;

/// Compiles a built-in pattern.
#[allow(clippy::expect_used)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

/// Splits `value` on top-level whitespace, keeping parenthesised groups
/// (`calc(4px + 2px)`) whole. Yields each part with its relative start.
#[must_use]
pub fn split_top_level(value: &str) -> Vec<(usize, &str)> {
    let bytes = value.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if b.is_ascii_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                parts.push((s, &value[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push((s, &value[s..]));
    }
    parts
}
