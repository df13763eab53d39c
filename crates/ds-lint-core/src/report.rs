//! Audit reports and their renderings.

use crate::fix::FixLog;
use crate::registry::RuleRegistry;
use crate::result::ValidationRun;
use crate::types::{Severity, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Number of recommendations a report carries.
pub const TOP_RECOMMENDATIONS: usize = 3;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    #[default]
    Cli,
    /// Pretty JSON.
    Json,
    /// Markdown document.
    Markdown,
    /// One line per violation.
    Compact,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cli" | "text" => Ok(Self::Cli),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

/// Aggregate counts of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Files considered.
    pub total_files: usize,
    /// Files with at least one violation.
    pub files_with_violations: usize,
    /// All violations.
    pub total_violations: usize,
    /// Error-level violations.
    pub errors: usize,
    /// Warning-level violations.
    pub warnings: usize,
    /// Info-level violations.
    pub infos: usize,
    /// Violations the autofix engine can rewrite.
    pub auto_fixable: usize,
    /// Files that could not be read.
    pub read_errors: usize,
}

/// A violation flattened with its file and fix information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatViolation {
    /// Path relative to the run root.
    pub file: PathBuf,
    /// The violation itself.
    #[serde(flatten)]
    pub violation: Violation,
    /// Whether the autofix engine can rewrite it.
    pub autofixable: bool,
    /// What the fix does, or why there is none.
    pub fix_explanation: String,
    /// Options for fixing by hand.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manual_fixes: Vec<String>,
}

/// A rule worth fixing first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Rule name.
    pub rule: String,
    /// Violations of this rule.
    pub count: usize,
    /// What to do about them.
    pub message: String,
}

/// What an autofix pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    /// Files written.
    pub files_changed: usize,
    /// Individual fixes applied.
    pub fixes_applied: usize,
    /// Violations left after revalidation.
    pub residual_violations: usize,
    /// Violations present after fixing that were not there before.
    pub introduced_violations: usize,
}

impl FixSummary {
    /// Compares the runs before and after fixing.
    ///
    /// Violations are matched by file, code and message, since fixing
    /// shifts their positions.
    #[must_use]
    pub fn compute(
        before: &ValidationRun,
        after: &ValidationRun,
        fixes: &BTreeMap<PathBuf, Vec<FixLog>>,
    ) -> Self {
        let mut seen: BTreeMap<(&Path, &str, &str), usize> = BTreeMap::new();
        for (path, v) in before.violations() {
            *seen.entry((path, v.code.as_str(), v.message.as_str())).or_default() += 1;
        }
        let mut introduced = 0;
        for (path, v) in after.violations() {
            match seen.get_mut(&(path, v.code.as_str(), v.message.as_str())) {
                Some(n) if *n > 0 => *n -= 1,
                _ => introduced += 1,
            }
        }
        Self {
            files_changed: fixes.len(),
            fixes_applied: fixes.values().map(Vec::len).sum(),
            residual_violations: after.total_violations(),
            introduced_violations: introduced,
        }
    }
}

/// Derived view of a [`ValidationRun`] for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Aggregate counts.
    pub summary: Summary,
    /// Every violation, ordered by file then position.
    pub violations: Vec<FlatViolation>,
    /// Rules ranked by violation count.
    pub recommendations: Vec<Recommendation>,
    /// Registered rules with no violations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passing_rules: Vec<String>,
    /// Files that could not be read, with their errors.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub read_errors: BTreeMap<PathBuf, String>,
    /// Present when an autofix pass ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixSummary>,
}

impl AuditReport {
    /// Builds a report from a run.
    #[must_use]
    pub fn build(run: &ValidationRun, registry: &RuleRegistry) -> Self {
        let mut violations: Vec<FlatViolation> = run
            .violations()
            .map(|(path, v)| flatten(path, v, registry))
            .collect();
        violations.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.violation.location.line.cmp(&b.violation.location.line))
                .then(a.violation.location.column.cmp(&b.violation.location.column))
                .then(a.violation.code.cmp(&b.violation.code))
        });

        let (errors, warnings, infos) = run.count_by_severity();
        let read_errors: BTreeMap<PathBuf, String> = run
            .read_errors()
            .map(|(p, e)| (p.to_path_buf(), e.to_string()))
            .collect();
        let summary = Summary {
            total_files: run.files_scanned,
            files_with_violations: run.files_with_violations(),
            total_violations: violations.len(),
            errors,
            warnings,
            infos,
            auto_fixable: violations.iter().filter(|v| v.autofixable).count(),
            read_errors: read_errors.len(),
        };

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for v in &violations {
            *counts.entry(v.violation.rule.as_str()).or_default() += 1;
        }
        let passing_rules = registry
            .names()
            .into_iter()
            .filter(|name| !counts.contains_key(name))
            .map(String::from)
            .collect();
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let recommendations = ranked
            .into_iter()
            .take(TOP_RECOMMENDATIONS)
            .map(|(rule, count)| Recommendation {
                rule: rule.to_string(),
                count,
                message: recommend(rule, count, registry),
            })
            .collect();

        Self {
            summary,
            violations,
            recommendations,
            passing_rules,
            read_errors,
            fix: None,
        }
    }

    /// Attaches the result of an autofix pass.
    #[must_use]
    pub fn with_fix(mut self, fix: FixSummary) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Groups violations by file, preserving order.
    #[must_use]
    pub fn by_file(&self) -> BTreeMap<&Path, Vec<&FlatViolation>> {
        let mut grouped: BTreeMap<&Path, Vec<&FlatViolation>> = BTreeMap::new();
        for v in &self.violations {
            grouped.entry(v.file.as_path()).or_default().push(v);
        }
        grouped
    }
}

fn flatten(path: &Path, v: &Violation, registry: &RuleRegistry) -> FlatViolation {
    let fixable_rule = registry.get(&v.rule).is_some_and(|r| r.rule.fixable());
    let replacement = v.replacement().filter(|_| fixable_rule);
    let fix_explanation = match replacement {
        Some(r) if r.is_removal() => format!("Auto-fix removes `{}`", r.original),
        Some(r) => format!("Auto-fix replaces `{}` with `{}`", r.original, r.new_text),
        None if v.category.is_some_and(|c| c.is_semantically_ambiguous())
            || registry
                .get(&v.rule)
                .is_some_and(|r| r.rule.category().is_semantically_ambiguous()) =>
        {
            "Needs a human decision: the right semantic token depends on what the value is for"
                .to_string()
        }
        None => v
            .suggestion
            .as_ref()
            .map_or_else(|| "Fix manually".to_string(), |s| s.message.clone()),
    };
    FlatViolation {
        file: path.to_path_buf(),
        autofixable: replacement.is_some(),
        manual_fixes: v
            .suggestion
            .as_ref()
            .map(|s| s.alternatives.clone())
            .unwrap_or_default(),
        fix_explanation,
        violation: v.clone(),
    }
}

fn recommend(rule: &str, count: usize, registry: &RuleRegistry) -> String {
    let plural = if count == 1 { "" } else { "s" };
    match registry.get(rule) {
        Some(r) if r.rule.fixable() => format!(
            "Fix {count} `{rule}` violation{plural}; many can be fixed with `ds-lint audit --fix`"
        ),
        Some(r) if !r.rule.description().is_empty() => {
            format!("Fix {count} `{rule}` violation{plural}: {}", r.rule.description())
        }
        _ => format!("Fix {count} `{rule}` violation{plural}"),
    }
}

/// Renders a report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &AuditReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report),
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Cli => Ok(render_cli(report)),
        ReportFormat::Compact => Ok(render_compact(report)),
    }
}

/// Renders a bare validation run.
///
/// JSON is the run itself; the other formats go through [`AuditReport`].
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_run(
    run: &ValidationRun,
    registry: &RuleRegistry,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => run.to_json(),
        other => render(&AuditReport::build(run, registry), other),
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "✖",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

fn render_cli(report: &AuditReport) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Scanned {} file(s), {} with violations",
        s.total_files, s.files_with_violations
    );
    let _ = writeln!(
        out,
        "✖ {} error(s)  ⚠ {} warning(s)  ℹ {} info(s)  🔧 {} auto-fixable",
        s.errors, s.warnings, s.infos, s.auto_fixable
    );
    if !report.recommendations.is_empty() {
        let top: Vec<String> = report
            .recommendations
            .iter()
            .take(TOP_RECOMMENDATIONS)
            .map(|r| format!("{} ({})", r.rule, r.count))
            .collect();
        let _ = writeln!(out, "Top priorities: {}", top.join(", "));
    }
    if let Some(fix) = &report.fix {
        let _ = writeln!(
            out,
            "Fixed {} violation(s) in {} file(s); {} remaining, {} introduced",
            fix.fixes_applied, fix.files_changed, fix.residual_violations, fix.introduced_violations
        );
    }

    for (file, violations) in report.by_file() {
        let _ = writeln!(out, "\n{}", file.display());
        for v in violations {
            let fix = if v.autofixable { " 🔧" } else { "" };
            let _ = writeln!(
                out,
                "  {} {}:{} [{}] {}{}",
                severity_icon(v.violation.severity),
                v.violation.location.line,
                v.violation.location.column,
                v.violation.code,
                v.violation.message,
                fix
            );
            if let Some(suggestion) = &v.violation.suggestion {
                let _ = writeln!(out, "    → {}", suggestion.message);
            }
        }
    }

    for (file, error) in &report.read_errors {
        let _ = writeln!(out, "\n{}\n  ✖ could not read: {}", file.display(), error);
    }
    out
}

fn render_compact(report: &AuditReport) -> String {
    let mut out = String::new();
    for v in &report.violations {
        let _ = writeln!(
            out,
            "{}:{}:{}: {} [{}] {}",
            v.file.display(),
            v.violation.location.line,
            v.violation.location.column,
            v.violation.severity,
            v.violation.code,
            v.violation.message
        );
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_markdown(report: &AuditReport) -> String {
    let s = &report.summary;
    let mut out = String::from("# Design System Audit\n\n");

    out.push_str("| Metric | Count |\n|--------|-------|\n");
    for (label, count) in [
        ("Files scanned", s.total_files),
        ("Files with violations", s.files_with_violations),
        ("Errors", s.errors),
        ("Warnings", s.warnings),
        ("Infos", s.infos),
        ("Auto-fixable", s.auto_fixable),
    ] {
        let _ = writeln!(out, "| {label} | {count} |");
    }

    if let Some(fix) = &report.fix {
        let _ = write!(
            out,
            "\n**Autofix:** {} fix(es) in {} file(s), {} remaining, {} introduced.\n",
            fix.fixes_applied, fix.files_changed, fix.residual_violations, fix.introduced_violations
        );
    }

    if !report.recommendations.is_empty() {
        out.push_str("\n## Recommendations\n\n");
        for (i, r) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "{}. **{}** ({}): {}", i + 1, r.rule, r.count, r.message);
        }
    }

    if !report.violations.is_empty() {
        out.push_str("\n## Violations\n");
        for (file, violations) in report.by_file() {
            let _ = write!(
                out,
                "\n### `{}`\n\n| Line | Severity | Rule | Message | Fix |\n|------|----------|------|---------|-----|\n",
                file.display()
            );
            for v in violations {
                let fix = if v.autofixable { "🔧 auto" } else { "manual" };
                let _ = writeln!(
                    out,
                    "| {}:{} | {} | {} | {} | {} |",
                    v.violation.location.line,
                    v.violation.location.column,
                    v.violation.severity,
                    v.violation.code,
                    escape_cell(&v.violation.message),
                    fix
                );
            }
        }
    }

    if !report.read_errors.is_empty() {
        out.push_str("\n## Unreadable files\n\n");
        for (file, error) in &report.read_errors {
            let _ = writeln!(out, "- `{}`: {}", file.display(), escape_cell(error));
        }
    }

    if !report.passing_rules.is_empty() {
        let _ = write!(
            out,
            "\n<details>\n<summary>Passing checks ({})</summary>\n\n",
            report.passing_rules.len()
        );
        for rule in &report.passing_rules {
            let _ = writeln!(out, "- `{rule}`");
        }
        out.push_str("\n</details>\n");
    }

    out
}
