//! Design-token namespace classifier.

use super::compile;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Purpose-named token prefixes.
pub const SEMANTIC_PREFIXES: &[&str] = &[
    "surface",
    "text",
    "border",
    "icon",
    "elevation",
    "radius",
    "typography",
];

/// Namespaces that hold raw, un-named values.
pub const FOUNDATION_NAMESPACES: &[&str] = &["palette", "primitive", "core"];

static VAR_REF: Lazy<Regex> = Lazy::new(|| compile(r"var\(\s*--([A-Za-z0-9_-]+)"));
static PALETTE_RAMP: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?:color-)?(?:slate|gray|grey|zinc|neutral|stone|red|orange|amber|yellow|lime|green|emerald|teal|cyan|sky|blue|indigo|violet|purple|fuchsia|pink|rose|black|white|brand)-\d{1,3}$")
});

/// Scope of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Raw palette step; never used directly in application code.
    Foundation,
    /// Purpose-named token.
    Semantic,
    /// Neither; possibly a typo.
    Unknown,
}

/// A `var(--name)` reference found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef<'a> {
    /// Token name without the leading `--`.
    pub name: &'a str,
    /// Range of `--name` relative to the searched text.
    pub range: Range<usize>,
}

/// Finds every `var(--name)` reference in `text`.
#[must_use]
pub fn find_var_refs(text: &str) -> Vec<TokenRef<'_>> {
    VAR_REF
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            Some(TokenRef {
                name: name.as_str(),
                range: (name.start() - 2)..name.end(),
            })
        })
        .collect()
}

/// Extracts the token name from a value that is exactly `var(--name)`
/// (optionally with a fallback).
#[must_use]
pub fn extract_var_name(value: &str) -> Option<&str> {
    let value = value.trim();
    let inner = value.strip_prefix("var(")?.strip_suffix(')')?.trim_start();
    let name = inner.strip_prefix("--")?;
    let end = name
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(name.len());
    (end > 0).then(|| &name[..end])
}

/// Classifies token names by namespace.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    semantic_prefixes: Vec<String>,
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenClassifier {
    /// Creates a classifier with the built-in semantic prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            semantic_prefixes: SEMANTIC_PREFIXES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Adds project-specific semantic prefixes.
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in prefixes {
            let p = p.into();
            if !self.semantic_prefixes.contains(&p) {
                self.semantic_prefixes.push(p);
            }
        }
        self
    }

    /// Returns the semantic prefixes in use.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.semantic_prefixes
    }

    /// Classifies a token name (without `--`).
    ///
    /// Palette ramps win over semantic prefixes, so `text-blue-500` style
    /// names do not pass as semantic.
    #[must_use]
    pub fn classify(&self, name: &str) -> TokenScope {
        let name = name.trim_start_matches('-');
        if PALETTE_RAMP.is_match(name)
            || FOUNDATION_NAMESPACES
                .iter()
                .any(|ns| name.strip_prefix(ns).is_some_and(|r| r.starts_with('-')))
        {
            return TokenScope::Foundation;
        }
        let semantic = self.semantic_prefixes.iter().any(|p| {
            name.strip_prefix(p.as_str())
                .is_some_and(|r| r.is_empty() || r.starts_with('-'))
        });
        if semantic {
            TokenScope::Semantic
        } else {
            TokenScope::Unknown
        }
    }
}

/// Classifies with the built-in prefixes.
#[must_use]
pub fn classify_token(name: &str) -> TokenScope {
    TokenClassifier::new().classify(name)
}

/// Manual-fix options shared by foundation and unknown tokens.
#[must_use]
pub fn remediation(classifier: &TokenClassifier) -> Vec<String> {
    classifier
        .prefixes()
        .iter()
        .map(|p| format!("var(--{p}-*)"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_token_scopes() {
        assert_eq!(classify_token("blue-500"), TokenScope::Foundation);
        assert_eq!(classify_token("color-gray-100"), TokenScope::Foundation);
        assert_eq!(classify_token("palette-accent"), TokenScope::Foundation);
        assert_eq!(classify_token("core-spacing-4"), TokenScope::Foundation);
        assert_eq!(classify_token("surface-neutral-primary"), TokenScope::Semantic);
        assert_eq!(classify_token("text-muted"), TokenScope::Semantic);
        assert_eq!(classify_token("made-up-thing"), TokenScope::Unknown);
        assert_eq!(classify_token("surfaces"), TokenScope::Unknown);
        assert_eq!(classify_token("corellian"), TokenScope::Unknown);
    }

    #[test]
    fn extra_prefixes_are_semantic() {
        let c = TokenClassifier::new().with_prefixes(["chart"]);
        assert_eq!(c.classify("chart-series-1"), TokenScope::Semantic);
        assert_eq!(classify_token("chart-series-1"), TokenScope::Unknown);
    }

    #[test]
    fn extracts_var_names() {
        assert_eq!(extract_var_name("var(--blue-500)"), Some("blue-500"));
        assert_eq!(extract_var_name(" var( --text-body, #000) "), Some("text-body"));
        assert_eq!(extract_var_name("calc(var(--x))"), None);
        assert_eq!(extract_var_name("var(--)"), None);
    }

    #[test]
    fn finds_references_with_ranges() {
        let text = "color: var(--blue-500); background: var( --surface-raised );";
        let refs = find_var_refs(text);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "blue-500");
        assert_eq!(&text[refs[0].range.clone()], "--blue-500");
        assert_eq!(&text[refs[1].range.clone()], "--surface-raised");
    }
}
