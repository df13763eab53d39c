//! Rule to require alternative text on images.
//!
//! `alt=""` is accepted: it marks an image as decorative.

use crate::patterns::structure::is_hidden;
use crate::support::violation;
use ds_lint_core::{Category, Concern, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for img-alt.
pub const CODE: &str = "A11Y002";

/// Rule name for img-alt.
pub const NAME: &str = "img-alt";

/// Elements that render an image.
const IMAGE_ELEMENTS: &[&str] = &["img", "Image"];

/// Requires `alt` on images.
#[derive(Debug, Clone, Default)]
pub struct ImgAlt;

impl ImgAlt {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ImgAlt {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires alt text on images"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn concern(&self) -> Concern {
        Concern::Accessibility
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/img-alt.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        ctx.markup
            .elements_named(IMAGE_ELEMENTS)
            .filter(|e| e.attr("alt").is_none() && !is_hidden(e))
            .map(|e| {
                violation(
                    self,
                    ctx,
                    e.start,
                    e.name.len() + 1,
                    format!("`<{}>` has no alt text", e.name),
                )
                .with_suggestion(Suggestion::new(
                    "Describe the image in alt, or use alt=\"\" if it is decorative",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::testing::check;

    #[test]
    fn missing_alt() {
        let src = "<div>\n  <img src={logo} />\n  <Image src=\"/a.png\" width={4} />\n</div>";
        let v = check(&ImgAlt::new(), src);
        assert_eq!(v.len(), 2);
        assert_eq!((v[0].location.line, v[0].location.column), (2, 2));
        assert_eq!(v[1].location.line, 3);
    }

    #[test]
    fn alt_present_or_decorative() {
        let src = r#"<img src={a} alt="Team photo" /><img src={b} alt="" /><img src={c} alt={caption} />"#;
        assert!(check(&ImgAlt::new(), src).is_empty());
    }

    #[test]
    fn only_a_true_aria_hidden_excuses_missing_alt() {
        let hidden = r#"<img src={a} aria-hidden="true" /><img src={b} aria-hidden /><img src={c} aria-hidden={true} />"#;
        assert!(check(&ImgAlt::new(), hidden).is_empty());

        let shown = r#"<img src={a} aria-hidden="false" /><img src={b} aria-hidden={false} />"#;
        assert_eq!(check(&ImgAlt::new(), shown).len(), 2);
    }
}
