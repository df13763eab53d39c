//! Color-literal detector.
//!
//! Hex and functional colors are recognisable by shape anywhere. Bare color
//! names are ordinary words, so they only count as colors where a color is
//! expected: a whole literal assigned to a color-bearing property, or the
//! value of a color-bearing declaration in CSS text.

use super::compile;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// CSS keywords that are never raw colors.
pub const KEYWORD_COLORS: &[&str] = &[
    "transparent",
    "inherit",
    "currentcolor",
    "initial",
    "unset",
    "revert",
];

/// Named CSS colors the detector recognises.
pub const NAMED_COLORS: &[&str] = &[
    "aqua", "azure", "beige", "black", "blue", "brown", "coral", "crimson", "cyan", "fuchsia",
    "gold", "gray", "green", "grey", "indigo", "ivory", "khaki", "lavender", "lime", "magenta",
    "maroon", "navy", "olive", "orange", "orchid", "pink", "plum", "purple", "red", "salmon",
    "silver", "tan", "teal", "tomato", "turquoise", "violet", "wheat", "white", "yellow",
    "lightgray", "darkgray", "whitesmoke",
];

static HEX: Lazy<Regex> = Lazy::new(|| compile(r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b"));
static FUNCTIONAL: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\b(rgba?|hsla?)\([^()]*\)"));
static WHOLE_HEX: Lazy<Regex> = Lazy::new(|| compile(r"^#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})$"));
static WHOLE_FUNCTIONAL: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(rgba?|hsla?)\([^()]*\)$"));
static CSS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)([a-z-]*(?:color|background|fill|stroke|border|outline)[a-z-]*)\s*:\s*([^;{}\n]+)")
});

/// Kind of color literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    /// `#fff`, `#ffffff80`.
    Hex,
    /// `rgb()` / `rgba()`.
    Rgb,
    /// `hsl()` / `hsla()`.
    Hsl,
    /// `red`, `white`.
    Named,
}

impl ColorKind {
    /// Human label for messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hex => "hex color",
            Self::Rgb => "rgb color",
            Self::Hsl => "hsl color",
            Self::Named => "named color",
        }
    }
}

/// A color found inside a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMatch {
    /// Kind of color.
    pub kind: ColorKind,
    /// Range relative to the searched text.
    pub range: Range<usize>,
}

/// Classifies a whole value, case-insensitively.
#[must_use]
pub fn classify_color(value: &str) -> Option<ColorKind> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    if KEYWORD_COLORS.contains(&lower.as_str()) {
        return None;
    }
    if WHOLE_HEX.is_match(value) {
        return Some(ColorKind::Hex);
    }
    if WHOLE_FUNCTIONAL.is_match(value) {
        return functional_kind(&lower);
    }
    NAMED_COLORS
        .contains(&lower.as_str())
        .then_some(ColorKind::Named)
}

fn functional_kind(lower: &str) -> Option<ColorKind> {
    if lower.contains("var(") {
        return None;
    }
    if lower.starts_with("rgb") {
        Some(ColorKind::Rgb)
    } else if lower.starts_with("hsl") {
        Some(ColorKind::Hsl)
    } else {
        None
    }
}

/// Finds hex and functional colors embedded in `text`.
///
/// A `#` glued to a word, a path or `&` is a fragment or an HTML entity,
/// not a color.
#[must_use]
pub fn find_colors(text: &str) -> Vec<ColorMatch> {
    let mut found: Vec<ColorMatch> = HEX
        .find_iter(text)
        .filter(|m| {
            m.start() == 0 || {
                let prev = text.as_bytes()[m.start() - 1];
                !(prev.is_ascii_alphanumeric() || matches!(prev, b'&' | b'/' | b'_'))
            }
        })
        .map(|m| ColorMatch {
            kind: ColorKind::Hex,
            range: m.range(),
        })
        .collect();
    found.extend(FUNCTIONAL.find_iter(text).filter_map(|m| {
        functional_kind(&m.as_str().to_ascii_lowercase()).map(|kind| ColorMatch {
            kind,
            range: m.range(),
        })
    }));
    found.sort_by_key(|m| m.range.start);
    found
}

/// Finds named colors used as values of color-bearing CSS declarations.
#[must_use]
pub fn find_named_in_css(text: &str) -> Vec<ColorMatch> {
    let mut found = Vec::new();
    for caps in CSS_DECLARATION.captures_iter(text) {
        let Some(value) = caps.get(2) else {
            continue;
        };
        let mut offset = value.start();
        for word in value.as_str().split(|c: char| c.is_ascii_whitespace() || c == ',') {
            let start = offset;
            offset += word.len() + 1;
            if classify_color(word) == Some(ColorKind::Named) {
                found.push(ColorMatch {
                    kind: ColorKind::Named,
                    range: start..start + word.len(),
                });
            }
        }
    }
    found
}

/// Returns true if a property or attribute name carries a color.
///
/// Accepts both CSS (`background-color`) and script (`backgroundColor`)
/// spellings.
#[must_use]
pub fn is_color_property(name: &str) -> bool {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();
    normalized.contains("color")
        || matches!(
            normalized.as_str(),
            "background" | "fill" | "stroke" | "border" | "outline" | "bg"
        )
}

/// Manual-fix options attached to every raw-color finding.
#[must_use]
pub fn remediation() -> Vec<String> {
    [
        "var(--surface-*) for backgrounds",
        "var(--text-*) for foreground text",
        "var(--border-*) for borders and dividers",
        "var(--icon-*) for icons",
        "a component prop (variant, tone) instead of a color",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_colors_case_insensitively() {
        assert_eq!(classify_color("#fff"), Some(ColorKind::Hex));
        assert_eq!(classify_color("#FFFFFF"), Some(ColorKind::Hex));
        assert_eq!(classify_color("#ffffff80"), Some(ColorKind::Hex));
        assert_eq!(classify_color("rgb(0,0,0)"), Some(ColorKind::Rgb));
        assert_eq!(classify_color("RGBA(0, 0, 0, 0.4)"), Some(ColorKind::Rgb));
        assert_eq!(classify_color("hsla(0,0%,0%,.5)"), Some(ColorKind::Hsl));
        assert_eq!(classify_color("red"), Some(ColorKind::Named));
        assert_eq!(classify_color("White"), Some(ColorKind::Named));
    }

    #[test]
    fn keywords_are_not_colors() {
        for value in ["transparent", "inherit", "currentColor", "initial", "unset", "revert"] {
            assert_eq!(classify_color(value), None, "{value}");
        }
        assert_eq!(classify_color("#ggg"), None);
        assert_eq!(classify_color("#12345"), None);
        assert_eq!(classify_color("rgb(var(--surface-rgb))"), None);
        assert_eq!(classify_color("redirect"), None);
    }

    #[test]
    fn finds_embedded_colors() {
        let text = "border: 1px solid #ccc; box-shadow: 0 1px rgba(0,0,0,.2); content: '&#123;'";
        let kinds: Vec<(ColorKind, &str)> = find_colors(text)
            .into_iter()
            .map(|m| (m.kind, &text[m.range]))
            .collect();
        assert_eq!(
            kinds,
            vec![(ColorKind::Hex, "#ccc"), (ColorKind::Rgb, "rgba(0,0,0,.2)")]
        );
    }

    #[test]
    fn hex_needs_a_boundary() {
        assert!(find_colors("#fffz").is_empty());
        assert!(find_colors("#section-title").is_empty());
        assert!(find_colors("/docs/#add").is_empty());
        assert!(find_colors("page#bad").is_empty());
    }

    #[test]
    fn named_colors_only_in_color_declarations() {
        let css = "color: red; margin: 0 auto; border: 1px solid White; content: 'red';";
        let found: Vec<&str> = find_named_in_css(css)
            .into_iter()
            .map(|m| &css[m.range])
            .collect();
        assert_eq!(found, vec!["red", "White"]);
    }

    #[test]
    fn color_properties() {
        assert!(is_color_property("backgroundColor"));
        assert!(is_color_property("border-color"));
        assert!(is_color_property("fill"));
        assert!(is_color_property("color"));
        assert!(!is_color_property("padding"));
        assert!(!is_color_property("title"));
    }
}
