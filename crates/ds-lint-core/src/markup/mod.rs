//! Markup model shared by every extraction engine.
//!
//! Rules never look for tags themselves. An engine turns file text into a
//! [`Markup`] (elements with their attributes, and the class attributes
//! derived from them), and rules consume that. The standalone
//! [`TextExtractor`] builds it with a tag scanner; a tree-aware engine can
//! build the same thing from a parse tree. Class attributes are derived
//! from elements by [`Markup::from_elements`] in both cases, so two engines
//! that agree on elements agree on classes.

pub mod lexer;
mod text;

pub use text::TextExtractor;

use std::ops::Range;
use std::path::Path;

/// Attribute names that carry class lists.
pub const CLASS_ATTRIBUTES: &[&str] = &["className", "class"];

/// A single attribute on an element's opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written (`aria-label`, `onClick`).
    pub name: String,
    /// Raw value text including quotes or braces; `None` for bare attributes.
    pub value: Option<String>,
    /// Byte offset of the attribute name.
    pub offset: usize,
    /// Byte offset of the raw value.
    pub value_offset: Option<usize>,
}

impl Attribute {
    /// Returns the value without quotes if it is a plain string literal.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        let raw = self.value.as_deref()?;
        strip_quotes(raw)
    }

    /// Returns true if the value is a `{...}` expression.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        self.value.as_deref().is_some_and(|v| v.starts_with('{'))
    }
}

/// An element found in markup.
///
/// Offsets are absolute byte offsets into the file text. For a
/// self-closing element `close_start` is `None` and `end == open_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (`button`, `IconButton`, `Dialog.Panel`).
    pub name: String,
    /// Offset of the `<` that opens the element.
    pub start: usize,
    /// Offset just past the `>` of the opening tag.
    pub open_end: usize,
    /// Offset of the `</` of the matching closing tag.
    pub close_start: Option<usize>,
    /// Offset just past the element.
    pub end: usize,
    /// Attributes of the opening tag, in source order.
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns true if any of `names` is present.
    #[must_use]
    pub fn has_any_attr(&self, names: &[&str]) -> bool {
        self.attributes
            .iter()
            .any(|a| names.contains(&a.name.as_str()))
    }

    /// Returns true if the element has no children section.
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.close_start.is_none()
    }

    /// Returns the text between the opening and closing tags.
    #[must_use]
    pub fn inner<'a>(&self, content: &'a str) -> &'a str {
        match self.close_start {
            Some(close) if close >= self.open_end && close <= content.len() => {
                &content[self.open_end..close]
            }
            _ => "",
        }
    }

    /// Returns true if `other` lies inside this element's children.
    #[must_use]
    pub fn contains(&self, other: &Element) -> bool {
        match self.close_start {
            Some(close) => other.start >= self.open_end && other.end <= close,
            None => false,
        }
    }
}

/// A class attribute's static text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttr {
    /// The class list as written, interpolations included.
    pub value: String,
    /// Absolute byte offset of the first byte of `value`.
    pub offset: usize,
    /// Value-relative ranges of `${...}` interpolations.
    pub dynamic: Vec<Range<usize>>,
}

/// One whitespace-separated class token with its absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassToken<'a> {
    /// Token text.
    pub text: &'a str,
    /// Absolute byte offset of the token.
    pub offset: usize,
}

impl ClassAttr {
    /// Splits the value into tokens.
    ///
    /// Tokens glued to an interpolation (`bg-${tone}-500`) cannot be known
    /// statically and are skipped.
    #[must_use]
    pub fn tokens(&self) -> Vec<ClassToken<'_>> {
        let bytes = self.value.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;
        let mut start: Option<usize> = None;
        let mut touched = false;

        while i < bytes.len() {
            if let Some(range) = self.dynamic.iter().find(|r| r.start == i) {
                if start.is_none() {
                    start = Some(i);
                }
                touched = true;
                i = range.end.max(i + 1);
                continue;
            }
            if bytes[i].is_ascii_whitespace() {
                if let Some(s) = start.take() {
                    if !touched {
                        tokens.push(self.token(s, i));
                    }
                }
                touched = false;
            } else if start.is_none() {
                start = Some(i);
            }
            i += 1;
        }
        if let Some(s) = start {
            if !touched {
                tokens.push(self.token(s, bytes.len()));
            }
        }
        tokens
    }

    fn token(&self, start: usize, end: usize) -> ClassToken<'_> {
        ClassToken {
            text: &self.value[start..end],
            offset: self.offset + start,
        }
    }
}

/// Everything an engine extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    /// Elements ordered by start offset.
    pub elements: Vec<Element>,
    /// Class attributes ordered by offset.
    pub class_attrs: Vec<ClassAttr>,
}

impl Markup {
    /// Builds markup from elements, deriving class attributes from them.
    #[must_use]
    pub fn from_elements(mut elements: Vec<Element>) -> Self {
        elements.sort_by_key(|e| e.start);
        let mut class_attrs: Vec<ClassAttr> = elements
            .iter()
            .flat_map(|e| e.attributes.iter())
            .filter(|a| CLASS_ATTRIBUTES.contains(&a.name.as_str()))
            .filter_map(class_attr_from)
            .collect();
        class_attrs.sort_by_key(|c| c.offset);
        Self {
            elements,
            class_attrs,
        }
    }

    /// Iterates elements whose name is one of `names`.
    pub fn elements_named<'a>(
        &'a self,
        names: &'a [&'a str],
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |e| names.contains(&e.name.as_str()))
    }

    /// Iterates elements nested inside `parent`.
    pub fn descendants<'a>(&'a self, parent: &'a Element) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| parent.contains(e))
    }
}

/// Turns file text into [`Markup`].
pub trait MarkupExtractor: Send + Sync {
    /// Short engine identifier (`"text"`, `"tree"`).
    fn engine(&self) -> &'static str;

    /// Extracts markup from one file's text.
    fn extract(&self, path: &Path, source: &str) -> Markup;
}

fn strip_quotes(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return Some(&raw[1..raw.len() - 1]);
        }
    }
    None
}

/// Derives a class attribute from `className="..."` or `className={"..."}`
/// style values. Any other expression is dynamic and yields `None`.
fn class_attr_from(attr: &Attribute) -> Option<ClassAttr> {
    let raw = attr.value.as_deref()?;
    let value_offset = attr.value_offset?;

    if let Some(inner) = strip_quotes(raw) {
        return Some(ClassAttr {
            value: inner.to_string(),
            offset: value_offset + 1,
            dynamic: Vec::new(),
        });
    }

    let body = raw.strip_prefix('{')?.strip_suffix('}')?;
    let lead = body.len() - body.trim_start().len();
    let expr = body.trim();
    let expr_offset = value_offset + 1 + lead;

    let lexed = lexer::lex(expr);
    match lexed.literals.as_slice() {
        [lit] if lit.start == 0 && lit.end == expr.len() => {
            let inner = lit.inner();
            let dynamic = lit
                .substitutions()
                .into_iter()
                .map(|r| (r.start - inner.start)..(r.end - inner.start))
                .collect();
            Some(ClassAttr {
                value: expr[inner.clone()].to_string(),
                offset: expr_offset + inner.start,
                dynamic,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str, value_offset: usize) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: Some(value.to_string()),
            offset: 0,
            value_offset: Some(value_offset),
        }
    }

    #[test]
    fn tokens_carry_absolute_offsets() {
        let c = ClassAttr {
            value: "flex  bg-blue-500 p-10".to_string(),
            offset: 100,
            dynamic: Vec::new(),
        };
        let tokens = c.tokens();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["flex", "bg-blue-500", "p-10"]);
        assert_eq!(tokens[1].offset, 106);
        assert_eq!(tokens[2].offset, 118);
    }

    #[test]
    fn tokens_touching_interpolation_are_skipped() {
        // "p-4 bg-${tone}-500 ${extra} m-8"
        let value = "p-4 bg-${tone}-500 ${extra} m-8".to_string();
        let c = ClassAttr {
            dynamic: vec![7..14, 19..27],
            value,
            offset: 0,
        };
        let texts: Vec<&str> = c.tokens().iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["p-4", "m-8"]);
    }

    #[test]
    fn string_attribute_becomes_class_attr() {
        let a = attr("className", "\"flex p-4\"", 20);
        let c = class_attr_from(&a).unwrap();
        assert_eq!(c.value, "flex p-4");
        assert_eq!(c.offset, 21);
    }

    #[test]
    fn braced_literal_becomes_class_attr() {
        let a = attr("className", "{ 'flex p-4' }", 10);
        let c = class_attr_from(&a).unwrap();
        assert_eq!(c.value, "flex p-4");
        // `{` at 10, space at 11, quote at 12, value at 13
        assert_eq!(c.offset, 13);
    }

    #[test]
    fn template_literal_records_interpolations() {
        let a = attr("className", "{`p-4 ${x}`}", 0);
        let c = class_attr_from(&a).unwrap();
        assert_eq!(c.value, "p-4 ${x}");
        assert_eq!(c.offset, 2);
        assert_eq!(c.dynamic, vec![4..8]);
    }

    #[test]
    fn call_expression_is_dynamic() {
        let a = attr("className", "{cn('a', b && 'c')}", 0);
        assert!(class_attr_from(&a).is_none());
    }

    #[test]
    fn element_inner_and_contains() {
        let content = "<a><b/></a>";
        let outer = Element {
            name: "a".into(),
            start: 0,
            open_end: 3,
            close_start: Some(7),
            end: 11,
            attributes: vec![],
        };
        let inner = Element {
            name: "b".into(),
            start: 3,
            open_end: 7,
            close_start: None,
            end: 7,
            attributes: vec![],
        };
        assert_eq!(outer.inner(content), "<b/>");
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(inner.is_self_closing());
    }
}
