//! Rule to forbid foundation tokens in application code.
//!
//! # Rationale
//!
//! Foundation tokens (`--blue-500`, `--palette-accent`) are the raw steps
//! semantic tokens are built from. Using them directly ties a component to
//! a palette position instead of a purpose, and theming stops working.
//!
//! Tokens that are neither foundation nor semantic are reported as
//! warnings: they are most often a typo of a semantic name.
//!
//! # Configuration
//!
//! - `semantic_prefixes`: extra prefixes that count as semantic

use crate::patterns::tokens::{find_var_refs, remediation, TokenClassifier, TokenScope};
use crate::support::{violation, violation_at};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for no-foundation-tokens.
pub const CODE: &str = "DS005";

/// Rule name for no-foundation-tokens.
pub const NAME: &str = "no-foundation-tokens";

/// Forbids foundation tokens and flags unknown ones.
#[derive(Debug, Clone, Default)]
pub struct NoFoundationTokens {
    classifier: TokenClassifier,
}

impl NoFoundationTokens {
    /// Creates a new rule with the built-in semantic prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classifier: TokenClassifier::new(),
        }
    }

    /// Adds project-specific semantic prefixes.
    #[must_use]
    pub fn semantic_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifier = self.classifier.with_prefixes(prefixes);
        self
    }
}

impl Rule for NoFoundationTokens {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids foundation tokens; use semantic tokens"
    }

    fn category(&self) -> Category {
        Category::Tokens
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/no-foundation-tokens.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        let mut violations = Vec::new();

        for literal in &ctx.lexed.literals {
            if ctx.lexed.in_comment(literal.start) {
                continue;
            }
            for quasi in &literal.quasis {
                for token in find_var_refs(&ctx.content[quasi.clone()]) {
                    let offset = quasi.start + token.range.start;
                    let len = token.range.len();
                    let found = match self.classifier.classify(token.name) {
                        TokenScope::Semantic => continue,
                        TokenScope::Foundation => violation(
                            self,
                            ctx,
                            offset,
                            len,
                            format!("Foundation token `--{}`; use a semantic token", token.name),
                        ),
                        TokenScope::Unknown => violation_at(
                            self,
                            ctx,
                            offset,
                            len,
                            Severity::Warning,
                            format!(
                                "Unknown token `--{}`; possible typo of a semantic token",
                                token.name
                            ),
                        ),
                    };
                    violations.push(found.with_suggestion(
                        Suggestion::new("Use the semantic token that matches the purpose")
                            .with_alternatives(remediation(&self.classifier)),
                    ));
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::testing::check;

    #[test]
    fn foundation_is_an_error() {
        let src = r#"const s = { color: "var(--blue-500)" };"#;
        let v = check(&NoFoundationTokens::new(), src);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].severity, Severity::Error);
        assert!(v[0].message.starts_with("Foundation token `--blue-500`"));
        assert_eq!(&src[v[0].location.offset..][..v[0].location.length], "--blue-500");
    }

    #[test]
    fn semantic_is_clean() {
        let src = r#"const s = { color: "var(--surface-neutral-primary)", border: `1px solid var(--border-subtle)` };"#;
        assert!(check(&NoFoundationTokens::new(), src).is_empty());
    }

    #[test]
    fn unknown_is_a_warning_with_distinct_message() {
        let src = r#"const s = { color: "var(--made-up-thing)" };"#;
        let v = check(&NoFoundationTokens::new(), src);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].severity, Severity::Warning);
        assert!(v[0].message.contains("possible typo"));
        assert!(!v[0].suggestion.as_ref().unwrap().alternatives.is_empty());
    }

    #[test]
    fn configured_prefixes_are_semantic() {
        let src = r#"const s = { stroke: "var(--chart-series-1)" };"#;
        assert_eq!(check(&NoFoundationTokens::new(), src).len(), 1);
        assert!(check(&NoFoundationTokens::new().semantic_prefixes(["chart"]), src).is_empty());
    }

    #[test]
    fn never_fixable() {
        let rule = NoFoundationTokens::new();
        let src = r#"const s = "var(--palette-accent)";"#;
        let v = check(&rule, src);
        assert!(!rule.autofix(src, &v[0]).fixed);
    }
}
