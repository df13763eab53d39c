//! Utility functions for rule implementations.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck, Allowances};

/// Returns true if `b` can be part of a class or identifier token.
#[must_use]
pub fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'/' | b'.' | b'[' | b']' | b'!' | b'#' | b'%')
}

/// Returns true if `line[start..end]` is not glued to neighbouring token bytes.
#[must_use]
pub fn is_word_bounded(line: &str, start: usize, end: usize) -> bool {
    let bytes = line.as_bytes();
    let before_ok = start == 0 || !is_token_byte(bytes[start - 1]);
    let after_ok = end >= bytes.len() || !is_token_byte(bytes[end]);
    before_ok && after_ok
}
