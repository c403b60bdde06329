//! CLI module for modns
//!
//! A small inspection tool over the resolver.
//!
//! ## Commands
//!
//! - `resolve <ROOT> <PATH>` - Resolve a dotted path and print what it yields
//! - `scan <ROOT>` - List the module files the registry picks up
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::ResolverConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic (collision, load failure) as a miette report.
    pub fn diagnostic(err: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Inspect lazily resolved module namespaces
#[derive(Parser, Debug)]
#[command(name = "modns")]
#[command(version = VERSION)]
#[command(about = "Inspect lazily resolved module namespaces", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a dotted path and print the node, value or absence it yields
    Resolve {
        /// Root directory of the namespace
        #[arg(value_name = "ROOT")]
        root: PathBuf,
        /// Dotted path, e.g. ui.widgets.Button
        #[arg(value_name = "PATH")]
        path: String,
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// List the module files found under a root
    Scan {
        /// Root directory of the namespace
        #[arg(value_name = "ROOT")]
        root: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Options shared by every command that scans a root.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Module file extension
    #[arg(long = "ext", value_name = "EXT", default_value = modns_core::conventions::DEFAULT_EXTENSION)]
    pub extension: String,
    /// File stem of directory-style modules
    #[arg(long = "index", value_name = "STEM", default_value = modns_core::conventions::INDEX_STEM)]
    pub index_stem: String,
    /// Do not follow symlinks while scanning
    #[arg(long = "no-follow-symlinks")]
    pub no_follow_symlinks: bool,
}

impl ScanArgs {
    pub fn config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .with_extension(self.extension.clone())
            .with_index_stem(self.index_stem.clone())
            .with_follow_symlinks(!self.no_follow_symlinks)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Resolve { root, path, scan } => commands::resolve_path(&root, &path, scan.config()),
        Command::Scan { root, scan } => commands::scan_root(&root, scan.config()),
    }
}

// ============================================================================
// Tests
// ============================================================================
