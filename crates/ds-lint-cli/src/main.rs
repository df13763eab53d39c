//! ds-lint CLI tool.
//!
//! Usage:
//! ```bash
//! ds-lint validate [OPTIONS] [PATH]
//! ds-lint audit [--fix] [OPTIONS] [PATH]
//! ds-lint list-rules
//! ds-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use ds_lint::{Engine, ReportFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Design-system compliance linter for React/TSX code bases
#[derive(Parser)]
#[command(name = "ds-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a source tree against the design system
    Validate {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "cli")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Markup engine: "text" (tag scanner) or "tree" (Tree-sitter)
        #[arg(long, default_value = "text")]
        engine: Engine,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Build an audit report, optionally fixing what can be fixed first
    Audit {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Apply auto-fixes and report the post-fix state
        #[arg(long)]
        fix: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "cli")]
        format: AuditFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Markup engine: "text" (tag scanner) or "tree" (Tree-sitter)
        #[arg(long, default_value = "text")]
        engine: Engine,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `validate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Cli,
    /// JSON of the raw per-file results.
    Json,
    /// Markdown document.
    Markdown,
    /// One-line-per-violation compact format.
    Compact,
    /// Source snippets with labelled spans.
    Diagnostic,
}

impl OutputFormat {
    /// Returns the report format, or `None` for diagnostics.
    #[must_use]
    pub fn report_format(self) -> Option<ReportFormat> {
        match self {
            Self::Cli => Some(ReportFormat::Cli),
            Self::Json => Some(ReportFormat::Json),
            Self::Markdown => Some(ReportFormat::Markdown),
            Self::Compact => Some(ReportFormat::Compact),
            Self::Diagnostic => None,
        }
    }
}

/// Output format for `audit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AuditFormat {
    /// Human-readable terminal output.
    #[default]
    Cli,
    /// JSON report.
    Json,
    /// Markdown document.
    Markdown,
}

impl From<AuditFormat> for ReportFormat {
    fn from(format: AuditFormat) -> Self {
        match format {
            AuditFormat::Cli => Self::Cli,
            AuditFormat::Json => Self::Json,
            AuditFormat::Markdown => Self::Markdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate {
            path,
            format,
            rules,
            engine,
            exclude,
        } => {
            let resolved = config_resolver::load(&path, cli.config.as_deref(), exclude)?;
            let passed = commands::validate::run(&path, format, rules, engine, resolved.config)?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Audit {
            path,
            fix,
            format,
            rules,
            engine,
            exclude,
        } => {
            let resolved = config_resolver::load(&path, cli.config.as_deref(), exclude)?;
            commands::audit::run(&path, fix, format, rules, engine, resolved.config)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_validate_flags() {
        let cli = Cli::try_parse_from([
            "ds-lint", "-v", "validate", "web", "--format", "diagnostic", "--rules", "DS001",
            "--engine", "tree", "-e", "**/gen/**",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Validate {
                path,
                format,
                rules,
                engine,
                exclude,
            } => {
                assert_eq!(path, PathBuf::from("web"));
                assert_eq!(format, OutputFormat::Diagnostic);
                assert_eq!(rules.as_deref(), Some("DS001"));
                assert_eq!(engine, Engine::Tree);
                assert_eq!(exclude, vec!["**/gen/**"]);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn audit_rejects_compact_format() {
        assert!(Cli::try_parse_from(["ds-lint", "audit", "--format", "compact"]).is_err());
        let cli = Cli::try_parse_from(["ds-lint", "audit", "--fix", "--format", "markdown"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Audit {
                fix: true,
                format: AuditFormat::Markdown,
                ..
            }
        ));
    }

    #[test]
    fn unknown_engine_is_rejected() {
        assert!(Cli::try_parse_from(["ds-lint", "validate", "--engine", "regex"]).is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ds-lint", "list-rules", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
