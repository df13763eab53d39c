//! Rule to keep UI imports on the design system's public entry points.
//!
//! # Detected Patterns
//!
//! - Imports from UI libraries the design system replaces (`@mui/material`,
//!   `antd`): not fixable, the component has to be swapped by hand.
//! - Deep imports into the package internals (`@ds/ui/src/Button/Button`):
//!   rewritten to the public entry point (`@ds/ui/Button`).
//!
//! # Configuration
//!
//! - `package`: design-system package name (default `@ds/ui`)
//! - `foreign`: extra UI libraries to forbid

use crate::patterns::imports::{find_imports, ImportKind, ImportPolicy};
use crate::support::{replacement, violation};
use ds_lint_core::{Category, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for import-paths.
pub const CODE: &str = "DS007";

/// Rule name for import-paths.
pub const NAME: &str = "import-paths";

/// Checks UI import paths.
#[derive(Debug, Clone, Default)]
pub struct ImportPaths {
    policy: ImportPolicy,
}

impl ImportPaths {
    /// Creates a new rule with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: ImportPolicy::new(),
        }
    }

    /// Sets the design-system package name.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.policy = self.policy.package(package);
        self
    }

    /// Adds UI libraries to forbid.
    #[must_use]
    pub fn foreign<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy = self.policy.foreign(libraries);
        self
    }
}

impl Rule for ImportPaths {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids foreign UI libraries and deep imports into design-system internals"
    }

    fn category(&self) -> Category {
        Category::Imports
    }

    fn doc_ref(&self) -> Option<&'static str> {
        Some("docs/rules/import-paths.md")
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if !ctx.is_supported() {
            return Vec::new();
        }
        let mut violations = Vec::new();

        for import in find_imports(ctx.content) {
            let start = import.range.start;
            let quoted = ctx
                .lexed
                .literal_at(start)
                .is_some_and(|l| l.start + 1 == start);
            if ctx.lexed.in_comment(start) || !quoted {
                continue;
            }
            let len = import.specifier.len();
            match self.policy.classify(import.specifier) {
                ImportKind::Ok => {}
                ImportKind::Foreign { library } => violations.push(
                    violation(
                        self,
                        ctx,
                        start,
                        len,
                        format!(
                            "Import from `{}`; {} replaces {library}",
                            import.specifier,
                            self.policy.package_name()
                        ),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Use the equivalent component from {}",
                        self.policy.package_name()
                    ))),
                ),
                ImportKind::DeepImport { public_path } => violations.push(
                    violation(
                        self,
                        ctx,
                        start,
                        len,
                        format!(
                            "Deep import `{}` reaches into design-system internals",
                            import.specifier
                        ),
                    )
                    .with_suggestion(Suggestion::with_fix(
                        format!("Import from `{public_path}`"),
                        replacement(ctx, start, import.specifier, public_path),
                    )),
                ),
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::testing::{check, fix_all};

    #[test]
    fn flags_foreign_and_deep_imports() {
        let src = r#"import { Button } from "@mui/material";
import { Card } from "@ds/ui/src/Card/Card";
import { Stack } from "@ds/ui";
import React from "react";
"#;
        let v = check(&ImportPaths::new(), src);
        assert_eq!(v.len(), 2);
        assert!(v[0].replacement().is_none());
        assert_eq!(
            v[1].replacement().map(|r| r.new_text.as_str()),
            Some("@ds/ui/Card")
        );
    }

    #[test]
    fn commented_and_quoted_imports_are_ignored() {
        let src = r#"// import x from "antd";
const help = "import x from 'antd'";
"#;
        assert!(check(&ImportPaths::new(), src).is_empty());
    }

    #[test]
    fn fix_rewrites_deep_imports_only() {
        let rule = ImportPaths::new();
        let src = "import a from \"antd\";\nimport { Card } from '@ds/ui/dist/Card';\n";
        let fixed = fix_all(&rule, src);
        assert_eq!(fixed, "import a from \"antd\";\nimport { Card } from '@ds/ui/Card';\n");
        assert_eq!(check(&rule, &fixed).len(), 1);
    }

    #[test]
    fn configured_package() {
        let rule = ImportPaths::new().package("@acme/ui").foreign(["styled-components"]);
        let src = "import styled from 'styled-components';\nimport { Card } from '@acme/ui/lib/Card';\n";
        assert_eq!(check(&rule, src).len(), 2);
    }
}
