//! TSX parse-tree nodes to markup elements.

use ds_lint_core::{Attribute, Element};
use tree_sitter::Node;

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

/// Collects every named element under `root`.
///
/// Fragments (`<>...</>`) have no name and are skipped; their children are
/// still visited.
pub(crate) fn elements(root: Node<'_>, src: &[u8]) -> Vec<Element> {
    let mut out = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let element = match node.kind() {
            "jsx_element" => paired(&node, src),
            "jsx_self_closing_element" => self_closing(&node, src),
            _ => None,
        };
        out.extend(element);

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    out
}

fn paired(node: &Node<'_>, src: &[u8]) -> Option<Element> {
    let open = node.child_by_field_name("open_tag")?;
    let name = open.child_by_field_name("name")?;
    // A missing closing tag is synthesized by error recovery with no width.
    let close = node
        .child_by_field_name("close_tag")
        .filter(|c| !c.is_missing() && c.end_byte() > c.start_byte());

    Some(Element {
        name: text(&name, src).to_string(),
        start: node.start_byte(),
        open_end: open.end_byte(),
        close_start: close.map(|c| c.start_byte()),
        end: close.map_or(open.end_byte(), |c| c.end_byte()),
        attributes: attributes(&open, src),
    })
}

fn self_closing(node: &Node<'_>, src: &[u8]) -> Option<Element> {
    let name = node.child_by_field_name("name")?;
    Some(Element {
        name: text(&name, src).to_string(),
        start: node.start_byte(),
        open_end: node.end_byte(),
        close_start: None,
        end: node.end_byte(),
        attributes: attributes(node, src),
    })
}

/// Spread attributes (`{...props}`) parse as expressions and are skipped.
fn attributes(tag: &Node<'_>, src: &[u8]) -> Vec<Attribute> {
    let mut cursor = tag.walk();
    tag.children_by_field_name("attribute", &mut cursor)
        .filter(|a| a.kind() == "jsx_attribute")
        .filter_map(|a| attribute(&a, src))
        .collect()
}

fn attribute(node: &Node<'_>, src: &[u8]) -> Option<Attribute> {
    let mut cursor = node.walk();
    let mut named = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment");
    let name = named.next()?;
    let value = named.next();

    Some(Attribute {
        name: text(&name, src).to_string(),
        value: value.map(|v| text(&v, src).to_string()),
        offset: node.start_byte(),
        value_offset: value.map(|v| v.start_byte()),
    })
}
