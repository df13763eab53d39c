//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# ds-lint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Lowest severity that makes `ds-lint validate` exit non-zero
fail_on = "error"

[scanner]
# Glob patterns to exclude, on top of node_modules, dist, build, .next and .git
exclude = [
    "**/generated/**",
    "**/*.stories.tsx",
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.no-raw-colors]
enabled = true
# severity = "warning"  # Override default severity

[rules.no-foundation-tokens]
# Extra token prefixes that count as semantic
semantic_prefixes = []

[rules.import-paths]
package = "@ds/ui"
# foreign = ["@fluentui/react"]

# [rules.modal-focus-trap]
# components = ["Popover"]

# [rules.keyboard-handlers]
# enabled = false
"#;

/// Config file name written by `init`.
const CONFIG_NAME: &str = "ds-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: ds-lint validate");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_lint::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert_eq!(config.scanner.exclude.len(), 2);

        let registry = ds_lint::rules::registry_from_config(&config).unwrap();
        assert_eq!(registry.len(), 11);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), false).unwrap();
        std::fs::write(&path, "preset = \"minimal\"\n").unwrap();

        assert!(write_config(dir.path(), false).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "preset = \"minimal\"\n"
        );

        write_config(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
