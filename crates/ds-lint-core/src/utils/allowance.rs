//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // ds-lint: allow(no-raw-colors) reason="brand logo colors are fixed"
//! {/* ds-lint: allow(img-alt, DS001) */}
//! ```
//!
//! A directive applies to its own line and to the line below it.

use std::collections::HashSet;

const MARKER: &str = "ds-lint:";

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names or codes that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// Line-indexed view of a file's allow directives.
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    /// `(line, directive)` pairs, 1-based lines.
    directives: Vec<(usize, AllowDirective)>,
}

impl Allowances {
    /// Collects every directive in `content`.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let directives = content
            .lines()
            .enumerate()
            .filter(|(_, l)| l.contains(MARKER))
            .filter_map(|(i, l)| parse_allow_directive(l).map(|d| (i + 1, d)))
            .collect();
        Self { directives }
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Checks whether `rule_name` (or `rule_code`) is allowed at `line`.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str, rule_code: &str) -> AllowCheck {
        for check_line in [line.saturating_sub(1), line] {
            if check_line == 0 {
                continue;
            }
            for (directive_line, directive) in &self.directives {
                if *directive_line != check_line {
                    continue;
                }
                if directive.rules.contains(rule_name)
                    || directive.rules.contains(rule_code)
                    || directive.rules.contains("all")
                {
                    return AllowCheck::Allowed {
                        reason: directive.reason.clone(),
                    };
                }
            }
        }
        AllowCheck::Denied
    }
}

/// Checks source code for an allowance directive covering `line`.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    Allowances::parse(content).check(line, rule_name, rule_name)
}

/// Parses an allowance directive from a line containing a comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let marker_pos = line.find(MARKER)?;
    let before = &line[..marker_pos];
    if !(before.contains("//") || before.contains("/*")) {
        return None;
    }

    let rest = line[marker_pos + MARKER.len()..].trim_start();
    let allow_content = rest.strip_prefix("allow(")?;
    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let reason_part = reason_part.trim();
        let body = reason_part.strip_prefix('"')?;
        let end = body.find('"')?;
        let reason = body[..end].trim();
        (!reason.is_empty()).then(|| reason.to_string())
    });

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_comment_directive() {
        let directive = parse_allow_directive("  // ds-lint: allow(no-raw-colors)").unwrap();
        assert!(directive.rules.contains("no-raw-colors"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn parses_jsx_comment_with_reason() {
        let directive = parse_allow_directive(
            r#"{/* ds-lint: allow(img-alt, DS001) reason="decorative hero" */}"#,
        )
        .unwrap();
        assert!(directive.rules.contains("img-alt"));
        assert!(directive.rules.contains("DS001"));
        assert_eq!(directive.reason.as_deref(), Some("decorative hero"));
    }

    #[test]
    fn marker_outside_comment_is_ignored() {
        assert!(parse_allow_directive(r#"const s = "ds-lint: allow(all)";"#).is_none());
    }

    #[test]
    fn directive_covers_same_and_next_line() {
        let content = "const a = 1;\n// ds-lint: allow(no-raw-colors)\nconst c = '#fff';\nconst d = '#000';";
        let allowances = Allowances::parse(content);
        assert!(allowances.check(2, "no-raw-colors", "DS004").is_allowed());
        assert!(allowances.check(3, "no-raw-colors", "DS004").is_allowed());
        assert!(!allowances.check(4, "no-raw-colors", "DS004").is_allowed());
        assert!(!allowances.check(3, "img-alt", "A11Y002").is_allowed());
    }

    #[test]
    fn code_and_all_match() {
        let content = "x // ds-lint: allow(DS004)\ny // ds-lint: allow(all) reason=\"legacy\"";
        let allowances = Allowances::parse(content);
        assert!(allowances.check(1, "no-raw-colors", "DS004").is_allowed());
        let check = allowances.check(2, "img-alt", "A11Y002");
        assert_eq!(check.reason(), Some("legacy"));
    }

    #[test]
    fn empty_reason_counts_as_missing() {
        let result = check_allow_with_reason(
            "// ds-lint: allow(img-alt) reason=\"\"\n<img />",
            2,
            "img-alt",
        );
        assert!(result.is_allowed());
        assert_eq!(result.reason(), None);
    }
}
