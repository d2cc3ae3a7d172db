//! Shirabe CLI
//!
//! Thin presentation layer over `shirabe_core`: reads documents, formats
//! lint results, applies fixes on request, and maps severities to exit
//! codes (1 when any error-severity finding exists, 2 on usage errors).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use shirabe_core::{LintResult, Linter, LinterConfig, rules};

mod output;

/// Shirabe - text linter with conflict-free auto-fixes
#[derive(Parser)]
#[command(name = "shirabe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files
    Lint {
        /// Files to lint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Auto-fix issues
        #[arg(long)]
        fix: bool,

        /// Preview fixes without applying them
        #[arg(long, requires = "fix")]
        dry_run: bool,
    },

    /// List built-in rules
    Rules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => LinterConfig::from_file(path).into_diagnostic()?,
        None => LinterConfig::new(),
    };

    match cli.command {
        Commands::Lint {
            files,
            format,
            fix,
            dry_run,
        } => run_lint(config, files, &format, fix, dry_run),
        Commands::Rules => {
            for rule_id in rules::BUILTIN_RULE_IDS {
                println!("{rule_id}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_lint(
    config: LinterConfig,
    files: Vec<PathBuf>,
    format: &str,
    fix: bool,
    dry_run: bool,
) -> Result<ExitCode> {
    let linter = Linter::new(config).into_diagnostic()?;

    let mut reports: Vec<(PathBuf, LintResult)> = Vec::new();
    let mut any_errors = false;
    let mut any_failures = false;

    for path in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                any_failures = true;
                continue;
            }
        };

        let result = linter.lint_text(&content);
        any_errors |= result.has_errors();

        if fix && result.fixable_issues > 0 {
            let fixed = linter.apply_fixes(&content, &result.findings);
            if dry_run {
                print!("{fixed}");
            } else if fixed != content {
                fs::write(&path, &fixed).into_diagnostic()?;
            }
        }

        reports.push((path, result));
    }

    match format {
        "text" => output::output_text(&reports),
        "json" => output::output_json(&reports)?,
        other => return Err(miette::miette!("unknown output format \"{other}\"")),
    }

    Ok(if any_errors || any_failures {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
