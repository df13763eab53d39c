//! Standalone markup extraction from raw text.
//!
//! Opening tags are parsed with quote and brace awareness, and closing tags
//! are matched to openings by a depth-counting stack, so a nested element
//! of the same name never steals its parent's closing tag. It is still a
//! best-effort scan: anything a real parser would reject may be read
//! differently than the tree engine reads it.

use super::lexer::{lex, scan_quoted, skip_braces};
use super::{Attribute, Element, Markup, MarkupExtractor};
use std::ops::Range;
use std::path::Path;
use tracing::trace;

/// Regex-free tag scanner over raw file text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    /// Creates a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MarkupExtractor for TextExtractor {
    fn engine(&self) -> &'static str {
        "text"
    }

    fn extract(&self, path: &Path, source: &str) -> Markup {
        // Plain TypeScript has no markup; `<T>` there is a type.
        if path.extension().and_then(|e| e.to_str()) == Some("ts") {
            return Markup::default();
        }
        Markup::from_elements(scan_elements(source))
    }
}

enum Tag {
    Open {
        name: String,
        start: usize,
        open_end: usize,
        self_closing: bool,
        attributes: Vec<Attribute>,
    },
    Close {
        name: String,
        start: usize,
        end: usize,
    },
}

/// Scans `source` for elements.
pub(crate) fn scan_elements(source: &str) -> Vec<Element> {
    let tags = scan_tags(source);
    match_tags(tags)
}

fn scan_tags(source: &str) -> Vec<Tag> {
    let bytes = source.as_bytes();
    let comments = lex(source).comments;
    let mut tags = Vec::new();
    let mut i = 0;
    // Comments are in source order; `next` is the first one not yet behind `i`.
    let mut next = 0;

    while i < bytes.len() {
        while comments.get(next).is_some_and(|c| c.end <= i) {
            next += 1;
        }
        if let Some(c) = comments.get(next).filter(|c| c.contains(&i)) {
            i = c.end;
            continue;
        }
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'/') => {
                if let Some((name, end)) = parse_close(source, i) {
                    tags.push(Tag::Close {
                        name,
                        start: i,
                        end,
                    });
                    i = end;
                    continue;
                }
            }
            Some(b) if b.is_ascii_alphabetic() && opens_tag(bytes, i) => {
                if let Some(tag) = parse_open(source, i) {
                    if let Tag::Open { open_end, .. } = &tag {
                        i = *open_end;
                    }
                    tags.push(tag);
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    tags
}

/// A `<` directly after an identifier or closing bracket is a comparison or
/// a type argument, not markup.
fn opens_tag(bytes: &[u8], lt: usize) -> bool {
    match bytes[..lt].iter().rev().find(|b| !b.is_ascii_whitespace()) {
        None => true,
        Some(&prev) => {
            let adjacent = lt > 0 && !bytes[lt - 1].is_ascii_whitespace();
            let identifier_like = prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'$';
            !(adjacent && (identifier_like || prev == b')' || prev == b']'))
        }
    }
}

fn name_end(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len()
        && (bytes[j].is_ascii_alphanumeric() || matches!(bytes[j], b'_' | b'.' | b':' | b'-' | b'$'))
    {
        j += 1;
    }
    j
}

fn skip_ws(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    j
}

fn parse_close(source: &str, lt: usize) -> Option<(String, usize)> {
    let bytes = source.as_bytes();
    let name_start = skip_ws(bytes, lt + 2);
    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }
    let name_stop = name_end(bytes, name_start);
    let gt = skip_ws(bytes, name_stop);
    (bytes.get(gt) == Some(&b'>'))
        .then(|| (source[name_start..name_stop].to_string(), gt + 1))
}

fn parse_open(source: &str, lt: usize) -> Option<Tag> {
    let bytes = source.as_bytes();
    let name_start = lt + 1;
    let name_stop = name_end(bytes, name_start);
    let name = source[name_start..name_stop].to_string();
    let mut attributes = Vec::new();
    let mut j = name_stop;

    loop {
        j = skip_ws(bytes, j);
        match bytes.get(j)? {
            b'>' => {
                return Some(Tag::Open {
                    name,
                    start: lt,
                    open_end: j + 1,
                    self_closing: false,
                    attributes,
                });
            }
            b'/' if bytes.get(j + 1) == Some(&b'>') => {
                return Some(Tag::Open {
                    name,
                    start: lt,
                    open_end: j + 2,
                    self_closing: true,
                    attributes,
                });
            }
            // Spread attributes are not recorded.
            b'{' => j = skip_braces(bytes, j)?,
            b if b.is_ascii_alphabetic() || matches!(b, b'_' | b'$') => {
                let attr_start = j;
                let attr_stop = name_end(bytes, j);
                j = skip_ws(bytes, attr_stop);
                let mut value: Option<Range<usize>> = None;
                if bytes.get(j) == Some(&b'=') {
                    let value_start = skip_ws(bytes, j + 1);
                    let value_end = match bytes.get(value_start)? {
                        q @ (b'"' | b'\'') => scan_attr_string(bytes, value_start, *q)?,
                        b'{' => skip_braces(bytes, value_start)?,
                        _ => return None,
                    };
                    value = Some(value_start..value_end);
                    j = value_end;
                }
                attributes.push(Attribute {
                    name: source[attr_start..attr_stop].to_string(),
                    value: value.clone().map(|r| source[r].to_string()),
                    offset: attr_start,
                    value_offset: value.map(|r| r.start),
                });
            }
            _ => return None,
        }
    }
}

/// Attribute strings may span lines, unlike script strings.
fn scan_attr_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    if let Some(end) = scan_quoted(bytes, start, quote) {
        return Some(end);
    }
    bytes[start + 1..]
        .iter()
        .position(|&b| b == quote)
        .map(|p| start + 1 + p + 1)
}

fn match_tags(tags: Vec<Tag>) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for tag in tags {
        match tag {
            Tag::Open {
                name,
                start,
                open_end,
                self_closing,
                attributes,
            } => {
                elements.push(Element {
                    name,
                    start,
                    open_end,
                    close_start: None,
                    end: open_end,
                    attributes,
                });
                if !self_closing {
                    stack.push(elements.len() - 1);
                }
            }
            Tag::Close { name, start, end } => {
                let Some(depth) = stack.iter().rposition(|&idx| elements[idx].name == name) else {
                    trace!("Unmatched closing tag </{}> at {}", name, start);
                    continue;
                };
                // Anything opened above the match is left unclosed.
                let idx = stack[depth];
                stack.truncate(depth);
                elements[idx].close_start = Some(start);
                elements[idx].end = end;
            }
        }
    }

    elements
}
