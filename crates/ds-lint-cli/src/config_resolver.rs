//! Locates and loads the configuration for a scan.
//!
//! The first hit wins:
//!
//! 1. `--config <file>`; a missing file is an error
//! 2. `ds-lint.toml` or `.ds-lint.toml` in the scanned directory
//! 3. `config.toml` in `$DS_LINT_CONFIG_DIR`, else in `~/.ds-lint/`
//!
//! With none of them present the built-in defaults apply.

use anyhow::{Context, Result};
use ds_lint::Config;
use std::path::{Path, PathBuf};

/// Origin of the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the scanned sources.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Built-in defaults.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{}", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// A loaded config and where it came from.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Where `config` came from.
    pub source: ConfigSource,
    /// The parsed config, with command-line excludes appended.
    pub config: Config,
}

const GLOBAL_FILE: &str = "config.toml";

/// Loads the config that applies to `project_dir`, then appends the
/// command-line `exclude` globs to `scanner.exclude`.
///
/// # Errors
///
/// Fails when the chosen file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>, exclude: Vec<String>) -> Result<Resolved> {
    let mut resolved = load_from(project_dir, explicit, global_config_dir())?;
    resolved.config.scanner.exclude.extend(exclude);
    tracing::debug!("Config: {}", resolved.source);
    Ok(resolved)
}

fn load_from(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> Result<Resolved> {
    if let Some(path) = explicit {
        return Ok(Resolved {
            config: read(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    let discovered = ds_lint::discover_config(project_dir)
        .with_context(|| format!("Failed to load config in {}", project_dir.display()))?;
    if let Some((path, config)) = discovered {
        return Ok(Resolved {
            source: ConfigSource::Project(path),
            config,
        });
    }

    if let Some(path) = global_dir.map(|dir| dir.join(GLOBAL_FILE)).filter(|p| p.is_file()) {
        tracing::info!("Using global config: {}", path.display());
        return Ok(Resolved {
            config: read(&path)?,
            source: ConfigSource::Global(path),
        });
    }

    Ok(Resolved {
        source: ConfigSource::Default,
        config: Config::default(),
    })
}

fn read(path: &Path) -> Result<Config> {
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// `$DS_LINT_CONFIG_DIR`, falling back to `~/.ds-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("DS_LINT_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".ds-lint")),
    }
}
