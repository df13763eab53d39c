//! Structural markup extractor using Tree-sitter.
//!
//! `.tsx`, `.jsx` and `.js` files are parsed with the TSX grammar, `.ts`
//! files with the plain TypeScript grammar, which has no JSX nodes and so
//! yields no markup (`<T>x` there is a type assertion). If a grammar cannot
//! be loaded or a parse is abandoned, the file falls back to the standalone
//! [`TextExtractor`].

use crate::jsx;
use ds_lint_core::{Markup, MarkupExtractor, TextExtractor};
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::{Language, Parser};

/// Extracts markup from a TSX/TypeScript parse tree.
pub struct StructuralExtractor {
    tsx: Language,
    typescript: Language,
}

impl StructuralExtractor {
    /// Creates a new structural extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    fn language_for(&self, path: &Path) -> &Language {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts" | "mts" | "cts") => &self.typescript,
            _ => &self.tsx,
        }
    }
}

impl Default for StructuralExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupExtractor for StructuralExtractor {
    fn engine(&self) -> &'static str {
        "tree"
    }

    fn extract(&self, path: &Path, source: &str) -> Markup {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(self.language_for(path)) {
            warn!(
                "Cannot load grammar for {}: {}; using text extraction",
                path.display(),
                e
            );
            return TextExtractor::new().extract(path, source);
        }

        let Some(tree) = parser.parse(source, None) else {
            warn!("Parse of {} was abandoned; using text extraction", path.display());
            return TextExtractor::new().extract(path, source);
        };

        let root = tree.root_node();
        if root.has_error() {
            debug!("{} has syntax errors; keeping recovered nodes", path.display());
        }
        Markup::from_elements(jsx::elements(root, source.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Markup {
        StructuralExtractor::new().extract(Path::new("App.tsx"), src)
    }

    #[test]
    fn engine_id() {
        assert_eq!(StructuralExtractor::new().engine(), "tree");
    }

    #[test]
    fn paired_element_offsets() {
        let src = r#"const A = () => <Button variant="primary" onClick={go}>Save</Button>;"#;
        let m = extract(src);
        assert_eq!(m.elements.len(), 1);
        let button = &m.elements[0];
        assert_eq!(button.name, "Button");
        assert_eq!(button.start, src.find('<').unwrap());
        assert_eq!(button.inner(src), "Save");
        assert_eq!(button.end, src.rfind('>').unwrap() + 1);
        assert_eq!(
            button.attr("variant").and_then(|a| a.string_value()),
            Some("primary")
        );
        assert_eq!(button.attr("onClick").and_then(|a| a.value.as_deref()), Some("{go}"));
    }

    #[test]
    fn self_closing_and_bare_attributes() {
        let src = r#"const A = () => <input aria-label="Name" disabled />;"#;
        let m = extract(src);
        let input = &m.elements[0];
        assert!(input.is_self_closing());
        assert_eq!(input.end, input.open_end);
        assert!(input.attr("disabled").is_some_and(|a| a.value.is_none()));
        let label = input.attr("aria-label").unwrap();
        assert_eq!(label.offset, src.find("aria-label").unwrap());
        assert_eq!(label.value_offset, Some(src.find("\"Name\"").unwrap()));
    }

    #[test]
    fn member_names_and_fragments() {
        let src = "const A = () => (<><Dialog.Panel><p>x</p></Dialog.Panel></>);";
        let m = extract(src);
        let names: Vec<&str> = m.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Dialog.Panel", "p"]);
        assert!(m.elements[0].contains(&m.elements[1]));
    }

    #[test]
    fn spread_attributes_are_not_recorded() {
        let src = "const A = (props) => <div {...props} id=\"x\" />;";
        let m = extract(src);
        let names: Vec<&str> = m.elements[0].attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn markup_in_attribute_expressions_is_found() {
        let src = "const A = () => <Field label={<Label>Name</Label>} />;";
        let m = extract(src);
        let names: Vec<&str> = m.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Field", "Label"]);
    }

    #[test]
    fn class_attributes_are_derived() {
        let src = r#"const A = () => <div className="flex p-4"><span class={`gap-${n} m-2`} /></div>;"#;
        let m = extract(src);
        assert_eq!(m.class_attrs.len(), 2);
        assert_eq!(m.class_attrs[0].value, "flex p-4");
        assert_eq!(m.class_attrs[0].offset, src.find("flex").unwrap());
        let tokens: Vec<&str> = m.class_attrs[1].tokens().iter().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["m-2"]);
    }

    #[test]
    fn plain_typescript_has_no_markup() {
        let m = StructuralExtractor::new()
            .extract(Path::new("cast.ts"), "const x = <Foo>y; const n = a < b;");
        assert!(m.elements.is_empty());
    }

    #[test]
    fn strings_that_look_like_tags_are_not_markup() {
        let m = extract(r#"const html = "<b>bold</b>";"#);
        assert!(m.elements.is_empty());
    }
}
