//! Rule registry.
//!
//! The registry is an explicit value built once at start-up and handed to
//! the validator and the autofix engine. Severity belongs to the
//! registration, not the rule, so the same rule can be an error in one
//! preset and a warning in another.

use crate::config::Config;
use crate::rule::{Rule, RuleBox};
use crate::types::{Concern, Severity, Violation};
use tracing::debug;

/// A rule with the severity it runs at.
pub struct Registration {
    /// The rule.
    pub rule: RuleBox,
    /// Severity assigned to the rule's findings.
    pub severity: Severity,
}

impl Registration {
    /// Registers `rule` at its default severity.
    #[must_use]
    pub fn new(rule: RuleBox) -> Self {
        let severity = rule.default_severity();
        Self { rule, severity }
    }

    /// Maps the severity of a finding onto this registration.
    ///
    /// Findings at the rule's default level take the registered severity.
    /// Findings a rule deliberately reports below its default (a hairline
    /// note, an unknown token) are capped at the registered severity.
    #[must_use]
    pub fn map_severity(&self, found: Severity) -> Severity {
        if found >= self.rule.default_severity() {
            self.severity
        } else {
            found.min(self.severity)
        }
    }

    /// Applies [`Registration::map_severity`] to each violation.
    #[must_use]
    pub fn apply(&self, mut violations: Vec<Violation>) -> Vec<Violation> {
        for v in &mut violations {
            v.severity = self.map_severity(v.severity);
        }
        violations
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("rule", &self.rule.name())
            .field("severity", &self.severity)
            .finish()
    }
}

/// Ordered collection of registrations, unique by rule name.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    entries: Vec<Registration>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule at its default severity, replacing any rule of the same name.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> &mut Self {
        self.register_box(Box::new(rule))
    }

    /// Adds a boxed rule at its default severity.
    pub fn register_box(&mut self, rule: RuleBox) -> &mut Self {
        let registration = Registration::new(rule);
        match self
            .entries
            .iter()
            .position(|r| r.rule.name() == registration.rule.name())
        {
            Some(idx) => self.entries[idx] = registration,
            None => self.entries.push(registration),
        }
        self
    }

    /// Adds a rule and returns the registry, for chaining by value.
    #[must_use]
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.register(rule);
        self
    }

    /// Looks up a registration by rule name or code.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Registration> {
        self.entries
            .iter()
            .find(|r| r.rule.name() == id || r.rule.code() == id)
    }

    /// Iterates registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Iterates registrations of one concern.
    pub fn by_concern(&self, concern: Concern) -> impl Iterator<Item = &Registration> {
        self.entries
            .iter()
            .filter(move |r| r.rule.concern() == concern)
    }

    /// Returns the registered rule names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|r| r.rule.name()).collect()
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the severity of a registration. Unknown ids are ignored.
    pub fn set_severity(&mut self, id: &str, severity: Severity) -> &mut Self {
        if let Some(r) = self
            .entries
            .iter_mut()
            .find(|r| r.rule.name() == id || r.rule.code() == id)
        {
            r.severity = severity;
        }
        self
    }

    /// Sets every registration to `severity`.
    pub fn set_all_severities(&mut self, severity: Severity) -> &mut Self {
        for r in &mut self.entries {
            r.severity = severity;
        }
        self
    }

    /// Removes a registration by name or code.
    pub fn remove(&mut self, id: &str) -> Option<Registration> {
        let idx = self
            .entries
            .iter()
            .position(|r| r.rule.name() == id || r.rule.code() == id)?;
        Some(self.entries.remove(idx))
    }

    /// Keeps only the comma-separated rule names or codes in `ids`.
    ///
    /// Unknown ids are ignored. An empty list keeps everything.
    #[must_use]
    pub fn filter(mut self, ids: &str) -> Self {
        let wanted: Vec<&str> = ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() {
            return self;
        }
        for id in &wanted {
            if self.get(id).is_none() {
                debug!("Ignoring unknown rule id in filter: {}", id);
            }
        }
        self.entries.retain(|r| {
            wanted
                .iter()
                .any(|id| *id == r.rule.name() || *id == r.rule.code())
        });
        self
    }

    /// Applies `enabled` and `severity` from per-rule configuration.
    pub fn apply_config(&mut self, config: &Config) -> &mut Self {
        self.entries.retain(|r| {
            let enabled = config.is_rule_enabled(r.rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", r.rule.name());
            }
            enabled
        });
        for r in &mut self.entries {
            if let Some(severity) = config.rule_severity(r.rule.name()) {
                r.severity = severity;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FileContext;
    use crate::types::Category;

    struct Fake {
        name: &'static str,
        code: &'static str,
        severity: Severity,
        concern: Concern,
    }

    impl Rule for Fake {
        fn name(&self) -> &'static str {
            self.name
        }
        fn code(&self) -> &'static str {
            self.code
        }
        fn category(&self) -> Category {
            Category::Utilities
        }
        fn concern(&self) -> Concern {
            self.concern
        }
        fn default_severity(&self) -> Severity {
            self.severity
        }
        fn check(&self, _ctx: &FileContext) -> Vec<Violation> {
            Vec::new()
        }
    }

    fn registry() -> RuleRegistry {
        RuleRegistry::new()
            .with(Fake {
                name: "alpha",
                code: "A001",
                severity: Severity::Error,
                concern: Concern::Styling,
            })
            .with(Fake {
                name: "beta",
                code: "B001",
                severity: Severity::Warning,
                concern: Concern::Accessibility,
            })
    }

    #[test]
    fn lookup_by_name_or_code() {
        let r = registry();
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("A001").map(|x| x.rule.name()), Some("alpha"));
        assert_eq!(r.get("beta").map(|x| x.severity), Some(Severity::Warning));
        assert!(r.get("gamma").is_none());
        assert_eq!(r.by_concern(Concern::Accessibility).count(), 1);
    }

    #[test]
    fn registering_same_name_replaces() {
        let mut r = registry();
        r.register(Fake {
            name: "alpha",
            code: "A001",
            severity: Severity::Info,
            concern: Concern::Styling,
        });
        assert_eq!(r.names(), vec!["alpha", "beta"]);
        assert_eq!(r.get("alpha").map(|x| x.severity), Some(Severity::Info));
    }

    #[test]
    fn filter_accepts_names_and_codes_and_ignores_unknown() {
        let r = registry().filter("B001, nope");
        assert_eq!(r.names(), vec!["beta"]);
        let r = registry().filter("");
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn severity_mapping_caps_lower_findings() {
        let mut r = registry();
        r.set_severity("alpha", Severity::Warning);
        let reg = r.get("alpha").unwrap();
        assert_eq!(reg.map_severity(Severity::Error), Severity::Warning);
        assert_eq!(reg.map_severity(Severity::Info), Severity::Info);

        r.set_all_severities(Severity::Error);
        let beta = r.get("beta").unwrap();
        assert_eq!(beta.map_severity(Severity::Warning), Severity::Error);
        assert_eq!(beta.map_severity(Severity::Info), Severity::Info);
    }

    #[test]
    fn config_disables_and_overrides() {
        let config = Config::parse(
            r#"
[rules.alpha]
enabled = false
[rules.beta]
severity = "error"
"#,
        )
        .unwrap();
        let mut r = registry();
        r.apply_config(&config);
        assert_eq!(r.names(), vec!["beta"]);
        assert_eq!(r.get("beta").map(|x| x.severity), Some(Severity::Error));
    }
}
