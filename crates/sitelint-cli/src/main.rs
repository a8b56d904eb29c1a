//! sitelint CLI tool.
//!
//! Usage:
//! ```bash
//! sitelint links|a11y|seo|theme-assets|all [--root DIR] [--format FORMAT]
//! sitelint check --rules img-alt,SL020
//! sitelint list-rules
//! sitelint init
//! ```
//!
//! Exit codes: 0 when clean, 1 when violations reach `fail_on`, 2 on fatal
//! errors.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sitelint_core::AnalyzerError;
use sitelint_rules::Audit;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

use commands::audit::Selection;
use settings::Settings;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SITELINT_LOG";

/// Quality auditor for generated static sites
#[derive(Parser)]
#[command(name = "sitelint")]
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
    /// Check that internal links and asset references resolve
    Links(AuditArgs),

    /// Run the basic accessibility checks
    A11y(AuditArgs),

    /// Check for standard SEO and social-card tags
    Seo(AuditArgs),

    /// Check that dark/light image variants come in pairs
    ThemeAssets(AuditArgs),

    /// Run every default rule plus declarative rules from the config
    All(AuditArgs),

    /// Run a hand-picked set of rules
    Check {
        #[command(flatten)]
        target: TargetArgs,

        /// Rules to run, by name or code (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        rules: Vec<String>,
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

/// Where and how to audit.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Site root (default: `analyzer.root` from config, else HTML_TEMPLATE)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Exclude patterns relative to the root (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

#[derive(Args)]
struct AuditArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Add the element-scoped accessibility rules
    #[arg(long)]
    strict: bool,
}

/// Output format for audit results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report_fatal(err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (selection, target) = match cli.command {
        Commands::Links(args) => (Selection::Audit(Audit::Links, args.strict), args.target),
        Commands::A11y(args) => (Selection::Audit(Audit::A11y, args.strict), args.target),
        Commands::Seo(args) => (Selection::Audit(Audit::Seo, args.strict), args.target),
        Commands::ThemeAssets(args) => {
            (Selection::Audit(Audit::ThemeAssets, args.strict), args.target)
        }
        Commands::All(args) => (Selection::Audit(Audit::All, args.strict), args.target),
        Commands::Check { target, rules } => (Selection::Rules(rules), target),
        Commands::ListRules => {
            let origin = settings::locate(cli.config.as_deref(), None);
            commands::list_rules::run(&Settings::load(origin, None)?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Init { force } => {
            commands::init::run(Path::new("."), force)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let root = target.root.as_deref();
    let settings = Settings::load(settings::locate(cli.config.as_deref(), root), root)?;
    commands::audit::run(&selection, &target, settings)
}

/// Prints a fatal error, with diagnostics for analyzer failures.
fn report_fatal(err: anyhow::Error) {
    match err.downcast::<AnalyzerError>() {
        Ok(analyzer_err) => eprintln!("{:?}", miette::Report::new(analyzer_err)),
        Err(err) => eprintln!("Error: {err:?}"),
    }
}
