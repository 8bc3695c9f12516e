//! codecheck CLI tool.
//!
//! Usage:
//! ```bash
//! codecheck check [OPTIONS] [PATH]
//! codecheck list-rules [PATH]
//! codecheck init
//! ```

use clap::{Parser, Subcommand};
use codecheck_core::Severity;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Configurable regex linter: reports forbidden patterns, optionally ignoring comments
#[derive(Parser)]
#[command(name = "codecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (`.json` selects the legacy format)
    #[arg(short, long, global = true, env = "CODECHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files for forbidden patterns
    Check {
        /// Root directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude regexes on relative paths (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Exit with status 1 when findings reach this severity
        #[arg(long)]
        fail_on: Option<SeverityArg>,
    },

    /// List configured rules
    ListRules {
        /// Root directory whose configuration is listed
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for scan results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Source line with a caret under each match.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

/// Severity threshold accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SeverityArg {
    /// Any finding fails the run.
    Info,
    /// Warnings and errors fail the run.
    Warning,
    /// Only errors fail the run.
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Self::Info,
            SeverityArg::Warning => Self::Warning,
            SeverityArg::Error => Self::Error,
        }
    }
}

/// Exit status when the scan ran and nothing reached the failure threshold.
pub(crate) const EXIT_SUCCESS: u8 = 0;

/// Exit status when findings reached the failure threshold.
pub(crate) const EXIT_FINDINGS: u8 = 1;

/// Exit status for fatal configuration and pattern errors.
pub(crate) const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, rules, exclude, fail_on.map(Into::into), &source)
        }
        Commands::ListRules { path } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::list_rules::run(&source).map(|()| EXIT_SUCCESS)
        }
        Commands::Init { force } => commands::init::run(force).map(|()| EXIT_SUCCESS),
    };

    let code = result.unwrap_or_else(|e| {
        eprintln!("Error: {e:?}");
        EXIT_CONFIG_ERROR
    });
    ExitCode::from(code)
}
