//! A small lexer for string literals and comments in script text.
//!
//! This is not a tokenizer for the whole language: it only finds the
//! regions raw-text rules care about. Quoted strings may not span a line;
//! an opening quote without a closing one on the same line is treated as
//! plain text (apostrophes in markup text).

use std::ops::Range;

/// Kind of string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `` `...` ``
    Template,
}

/// A string literal with its static parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Kind of quotes.
    pub kind: LiteralKind,
    /// Offset of the opening quote.
    pub start: usize,
    /// Offset just past the closing quote.
    pub end: usize,
    /// Absolute ranges of static text. Gaps between them are `${...}`.
    pub quasis: Vec<Range<usize>>,
}

impl Literal {
    /// Range between the quotes.
    #[must_use]
    pub fn inner(&self) -> Range<usize> {
        (self.start + 1)..(self.end - 1)
    }

    /// Absolute ranges of `${...}` interpolations.
    #[must_use]
    pub fn substitutions(&self) -> Vec<Range<usize>> {
        self.quasis
            .windows(2)
            .map(|pair| pair[0].end..pair[1].start)
            .collect()
    }
}

/// Literals and comments of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    /// String literals in source order.
    pub literals: Vec<Literal>,
    /// Comment ranges in source order.
    pub comments: Vec<Range<usize>>,
}

impl Lexed {
    /// Returns true if `offset` falls inside a comment.
    #[must_use]
    pub fn in_comment(&self, offset: usize) -> bool {
        self.comments.iter().any(|c| c.contains(&offset))
    }

    /// Returns the literal whose quotes enclose `offset`.
    #[must_use]
    pub fn literal_at(&self, offset: usize) -> Option<&Literal> {
        self.literals
            .iter()
            .find(|l| offset > l.start && offset < l.end)
    }
}

/// Lexes `source` for literals and comments.
#[must_use]
pub fn lex(source: &str) -> Lexed {
    let bytes = source.as_bytes();
    let mut out = Lexed::default();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') && (i == 0 || bytes[i - 1] != b':') => {
                let end = memchr_from(bytes, i, b'\n').unwrap_or(bytes.len());
                out.comments.push(i..end);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2);
                out.comments.push(i..end);
                i = end;
            }
            q @ (b'\'' | b'"') => match scan_quoted(bytes, i, q) {
                Some(end) => {
                    out.literals.push(Literal {
                        kind: if q == b'\'' {
                            LiteralKind::Single
                        } else {
                            LiteralKind::Double
                        },
                        start: i,
                        end,
                        quasis: vec![(i + 1)..(end - 1)],
                    });
                    i = end;
                }
                None => i += 1,
            },
            b'`' => match scan_template(bytes, i) {
                Some((end, quasis)) => {
                    out.literals.push(Literal {
                        kind: LiteralKind::Template,
                        start: i,
                        end,
                        quasis,
                    });
                    i = end;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }

    out
}

/// Scans a single-line quoted string starting at `start`. Returns the
/// offset just past the closing quote.
pub(crate) fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return None,
            b if b == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// Scans a template literal starting at the backtick at `start`.
fn scan_template(bytes: &[u8], start: usize) -> Option<(usize, Vec<Range<usize>>)> {
    let mut quasis = Vec::new();
    let mut quasi_start = start + 1;
    let mut j = start + 1;

    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'`' => {
                quasis.push(quasi_start..j);
                return Some((j + 1, quasis));
            }
            b'$' if bytes.get(j + 1) == Some(&b'{') => {
                quasis.push(quasi_start..j);
                let close = skip_braces(bytes, j + 1)?;
                j = close;
                quasi_start = close;
            }
            _ => j += 1,
        }
    }
    None
}

/// Skips a balanced `{...}` group starting at the `{` at `open`.
///
/// Quotes and nested templates inside the group are honoured. Returns the
/// offset just past the matching `}`.
pub(crate) fn skip_braces(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;

    while j < bytes.len() {
        match bytes[j] {
            b'{' => {
                depth += 1;
                j += 1;
            }
            b'}' => {
                depth = depth.checked_sub(1)?;
                j += 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            q @ (b'\'' | b'"') => j = scan_quoted(bytes, j, q).unwrap_or(j + 1),
            b'`' => j = scan_template(bytes, j).map_or(j + 1, |(end, _)| end),
            _ => j += 1,
        }
    }
    None
}

fn memchr_from(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == needle)
        .map(|p| p + from)
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
