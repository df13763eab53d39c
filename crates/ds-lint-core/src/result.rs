//! Validation results.

use crate::types::{Severity, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Outcome of one rule on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Rule name.
    pub rule: String,
    /// Rule code.
    pub code: String,
    /// Registered severity of the rule.
    pub severity: Severity,
    /// Violations found, in source order.
    #[serde(default)]
    pub violations: Vec<Violation>,
    /// Set when the rule failed on this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileResult {
    /// The file could not be read.
    Error {
        /// Read error message.
        error: String,
    },
    /// Results keyed by rule name.
    Rules(BTreeMap<String, RuleResult>),
}

impl FileResult {
    /// Iterates the file's violations in rule-name order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        let rules = match self {
            Self::Rules(rules) => Some(rules),
            Self::Error { .. } => None,
        };
        rules
            .into_iter()
            .flat_map(BTreeMap::values)
            .flat_map(|r| r.violations.iter())
    }

    /// Returns the read error, if the file could not be read.
    #[must_use]
    pub fn read_error(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Rules(_) => None,
        }
    }
}

/// A complete validation run over a directory.
///
/// Clean files have no entry. All maps are ordered, so serializing two runs
/// over unchanged inputs gives identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRun {
    /// Directory the run scanned.
    pub root: PathBuf,
    /// Number of files considered, unreadable ones included.
    pub files_scanned: usize,
    /// Results keyed by path relative to `root`.
    pub results: BTreeMap<PathBuf, FileResult>,
}

impl ValidationRun {
    /// Creates an empty run for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files_scanned: 0,
            results: BTreeMap::new(),
        }
    }

    /// Iterates `(relative path, violation)` pairs in path order.
    pub fn violations(&self) -> impl Iterator<Item = (&Path, &Violation)> {
        self.results
            .iter()
            .flat_map(|(path, r)| r.violations().map(move |v| (path.as_path(), v)))
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.violations().count()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations()
            .fold((0, 0, 0), |(e, w, i), (_, v)| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Returns true if any violation is at or above `threshold`.
    #[must_use]
    pub fn has_violations_at(&self, threshold: Severity) -> bool {
        self.violations().any(|(_, v)| v.severity >= threshold)
    }

    /// Returns true if any error-level violation exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Iterates files that could not be read, with their error messages.
    pub fn read_errors(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.results
            .iter()
            .filter_map(|(p, r)| r.read_error().map(|e| (p.as_path(), e)))
    }

    /// Iterates `(path, rule, error)` for rules that failed on a file.
    pub fn rule_errors(&self) -> impl Iterator<Item = (&Path, &str, &str)> {
        self.results.iter().flat_map(|(path, r)| {
            let rules = match r {
                FileResult::Rules(rules) => Some(rules),
                FileResult::Error { .. } => None,
            };
            rules.into_iter().flat_map(move |rules| {
                rules.values().filter_map(move |rr| {
                    rr.error
                        .as_deref()
                        .map(|e| (path.as_path(), rr.rule.as_str(), e))
                })
            })
        })
    }

    /// Number of files with at least one violation.
    #[must_use]
    pub fn files_with_violations(&self) -> usize {
        self.results
            .values()
            .filter(|r| r.violations().next().is_some())
            .count()
    }

    /// Serializes the run as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    fn violation(code: &str, severity: Severity) -> Violation {
        Violation::new(
            code,
            "some-rule",
            severity,
            Location::new(PathBuf::from("a.tsx"), 1, 0),
            "msg",
        )
    }

    fn run() -> ValidationRun {
        let mut rules = BTreeMap::new();
        rules.insert(
            "some-rule".to_string(),
            RuleResult {
                rule: "some-rule".into(),
                code: "DS001".into(),
                severity: Severity::Error,
                violations: vec![
                    violation("DS001", Severity::Error),
                    violation("DS001", Severity::Info),
                ],
                error: None,
            },
        );
        let mut run = ValidationRun::new("/repo");
        run.files_scanned = 3;
        run.results
            .insert(PathBuf::from("a.tsx"), FileResult::Rules(rules));
        run.results.insert(
            PathBuf::from("b.tsx"),
            FileResult::Error {
                error: "permission denied".into(),
            },
        );
        run
    }

    #[test]
    fn counts_skip_read_errors() {
        let run = run();
        assert_eq!(run.total_violations(), 2);
        assert_eq!(run.count_by_severity(), (1, 0, 1));
        assert_eq!(run.files_with_violations(), 1);
        assert_eq!(run.read_errors().count(), 1);
        assert!(run.has_errors());
        assert!(run.has_violations_at(Severity::Warning));
    }

    #[test]
    fn file_error_serializes_as_sentinel() {
        let json = serde_json::to_value(run()).unwrap();
        assert_eq!(json["results"]["b.tsx"]["error"], "permission denied");
        assert_eq!(json["results"]["a.tsx"]["some-rule"]["code"], "DS001");
    }

    #[test]
    fn json_round_trips() {
        let run = run();
        let back: ValidationRun = serde_json::from_str(&run.to_json().unwrap()).unwrap();
        assert_eq!(back, run);
    }

    #[test]
    fn rule_errors_are_listed() {
        let mut run = ValidationRun::new("/repo");
        let mut rules = BTreeMap::new();
        rules.insert(
            "boom".to_string(),
            RuleResult {
                rule: "boom".into(),
                code: "X1".into(),
                severity: Severity::Error,
                violations: Vec::new(),
                error: Some("panicked".into()),
            },
        );
        run.results.insert(PathBuf::from("c.tsx"), FileResult::Rules(rules));
        let errs: Vec<_> = run.rule_errors().collect();
        assert_eq!(errs, vec![(Path::new("c.tsx"), "boom", "panicked")]);
        assert_eq!(run.total_violations(), 0);
    }
}
