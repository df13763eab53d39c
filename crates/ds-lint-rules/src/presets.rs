//! Rule presets for common configurations.

use crate::{
    AccessibleLabels, ImgAlt, ImportPaths, KeyboardHandlers, ModalFocusTrap, NoForbiddenClasses,
    NoFoundationTokens, NoRawColors, NoTailwindOnlyClasses, SpacingGridClasses, SpacingGridValues,
};
use ds_lint_core::{Config, RuleBox, RuleRegistry, Severity};
use tracing::debug;

/// Preset configurations for ds-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule at its default severity.
    #[default]
    Recommended,
    /// Every rule, every finding at its default level an error.
    Strict,
    /// Forbidden classes and raw colors only, for gradual adoption.
    Minimal,
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Builds a registry for this preset.
    #[must_use]
    pub fn registry(self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for rule in self.rules() {
            registry.register_box(rule);
        }
        if self == Self::Strict {
            registry.set_all_severities(Severity::Error);
        }
        registry
    }
}

/// Returns the recommended set of rules.
///
/// Includes every built-in rule at its default severity.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the strict set of rules.
///
/// Same rules as recommended; [`Preset::registry`] raises them to errors.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `no-forbidden-classes` (DS001)
/// - `no-raw-colors` (DS004)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(NoForbiddenClasses::new()), Box::new(NoRawColors::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoForbiddenClasses::new()),
        Box::new(NoTailwindOnlyClasses::new()),
        Box::new(SpacingGridClasses::new()),
        Box::new(NoRawColors::new()),
        Box::new(NoFoundationTokens::new()),
        Box::new(SpacingGridValues::new()),
        Box::new(ImportPaths::new()),
        Box::new(KeyboardHandlers::new()),
        Box::new(ModalFocusTrap::new()),
        Box::new(AccessibleLabels::new()),
        Box::new(ImgAlt::new()),
    ]
}

/// Builds the registry described by `config`: its preset, rule options,
/// disabled rules and severity overrides.
///
/// # Errors
///
/// Returns an error if the configured preset is unknown.
pub fn registry_from_config(config: &Config) -> Result<RuleRegistry, String> {
    let preset: Preset = match config.preset.as_deref() {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };
    debug!("Using preset {:?}", preset);
    let mut registry = preset.registry();

    if let Some(rc) = config.rule(crate::no_foundation_tokens::NAME) {
        let prefixes = rc.get_str_array("semantic_prefixes");
        reconfigure(
            &mut registry,
            Box::new(NoFoundationTokens::new().semantic_prefixes(prefixes)),
        );
    }
    if let Some(rc) = config.rule(crate::import_paths::NAME) {
        let rule = ImportPaths::new()
            .package(rc.get_str("package", crate::patterns::imports::DEFAULT_PACKAGE))
            .foreign(rc.get_str_array("foreign"));
        reconfigure(&mut registry, Box::new(rule));
    }
    if let Some(rc) = config.rule(crate::modal_focus_trap::NAME) {
        let rule = ModalFocusTrap::new().components(rc.get_str_array("components"));
        reconfigure(&mut registry, Box::new(rule));
    }

    registry.apply_config(config);
    Ok(registry)
}

/// Swaps in a configured rule, keeping the severity the preset gave it.
/// Rules the preset does not include stay out.
fn reconfigure(registry: &mut RuleRegistry, rule: RuleBox) {
    let name = rule.name();
    let Some(severity) = registry.get(name).map(|r| r.severity) else {
        return;
    };
    registry.register_box(rule);
    registry.set_severity(name, severity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 11);
        assert_eq!(Preset::Strict.rules().len(), 11);
        assert_eq!(
            Preset::Minimal.registry().names(),
            vec!["no-forbidden-classes", "no-raw-colors"]
        );
    }

    #[test]
    fn strict_raises_everything_to_error() {
        let registry = Preset::Strict.registry();
        assert!(registry.iter().all(|r| r.severity == Severity::Error));
        let recommended = Preset::Recommended.registry();
        assert_eq!(
            recommended.get("DS002").map(|r| r.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn codes_and_names_are_unique() {
        let rules = all_rules();
        let mut names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        let mut codes: Vec<&str> = rules.iter().map(|r| r.code()).collect();
        names.sort_unstable();
        names.dedup();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(names.len(), rules.len());
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn parses_preset_names() {
        assert_eq!("Strict".parse::<Preset>(), Ok(Preset::Strict));
        assert!("loose".parse::<Preset>().is_err());
    }

    #[test]
    fn config_selects_preset_and_overrides() {
        let config = Config::parse(
            r#"
preset = "strict"

[rules.no-raw-colors]
severity = "warning"

[rules.img-alt]
enabled = false

[rules.import-paths]
package = "@acme/ui"
"#,
        )
        .unwrap();
        let registry = registry_from_config(&config).unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(
            registry.get("no-raw-colors").map(|r| r.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            registry.get("import-paths").map(|r| r.severity),
            Some(Severity::Error)
        );
        assert!(registry.get("img-alt").is_none());
    }

    #[test]
    fn options_for_rules_outside_the_preset_are_ignored() {
        let config = Config::parse(
            "preset = \"minimal\"\n[rules.modal-focus-trap]\ncomponents = [\"Popover\"]\n",
        )
        .unwrap();
        let registry = registry_from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = Config::parse("preset = \"loose\"").unwrap();
        assert!(registry_from_config(&config).is_err());
    }
}
