//! CLI module for fgen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `doc <header>...` - Insert documentation placeholders (in place, keeping a `.<name>` backup)
//! - `unittest <header>...` - Generate CppUnit test stubs (plus the runner main and makefile when absent)
//! - `source <header>` - Generate an out-of-line definition skeleton
//! - `header <file>` - Create a new header from the header scaffold
//! - `runner` - Write the CppUnit runner main
//! - `makefile` - Write a project makefile
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

use clap::{Parser, Subcommand};

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

/// Documentation and CppUnit scaffolding generator for C++ headers
#[derive(Parser, Debug)]
#[command(name = "fgen")]
#[command(version = VERSION)]
#[command(about = "Documentation and CppUnit scaffolding generator for C++ headers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub options: GlobalOptions,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE")]
    pub lex_file: Option<PathBuf>,

    /// Build the declaration tree only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "lex_file")]
    pub parse_file: Option<PathBuf>,
}

/// Flags shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file (default: $FGEN_HOME/fgen.toml, then ~/.fgen/fgen.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Value for ${author}, overriding the config file
    #[arg(long, global = true, value_name = "NAME")]
    pub author: Option<String>,

    /// Value for ${date} ("today" for the current date), overriding the config file
    #[arg(long, global = true, value_name = "DATE")]
    pub date: Option<String>,

    /// Overwrite existing outputs
    #[arg(long, global = true)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert documentation placeholders before every declaration
    Doc {
        /// Headers to annotate
        #[arg(value_name = "HEADER", required = true)]
        headers: Vec<PathBuf>,
        /// Write the result here instead of annotating in place (single header only)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate CppUnit test stubs
    Unittest {
        /// Headers to generate fixtures for
        #[arg(value_name = "HEADER", required = true)]
        headers: Vec<PathBuf>,
        /// Output file (single header only; default: <unit_test_dir>/<stem>Test<cpp_suffix>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Generate fixtures only for these types (repeatable; nested types allowed)
        #[arg(short = 's', long = "select", value_name = "TYPE")]
        select: Vec<String>,
        /// Project source that defines main(); left out of the unit-test makefile
        #[arg(short, long, value_name = "FILE")]
        main: Option<String>,
    },

    /// Generate empty definitions for the functions a header declares
    Source {
        /// Header to read
        #[arg(value_name = "HEADER")]
        header: PathBuf,
        /// Output file (default: <stem><cpp_suffix> next to the header)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Create a new header with include guards
    Header {
        /// Header to create
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },

    /// Write the CppUnit runner main
    Runner {
        /// Output file (default: <unit_test_dir>/main<cpp_suffix>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a makefile that builds every source in the current directory
    Makefile {
        /// Output file (default: makefile)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
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
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }

    let options = cli.options;
    match cli.command {
        Some(Command::Doc { headers, output }) => {
            single_header_output(&headers, output.as_ref())?;
            commands::doc(&options, &headers, output)
        }
        Some(Command::Unittest {
            headers,
            output,
            select,
            main,
        }) => {
            single_header_output(&headers, output.as_ref())?;
            commands::unittest(&options, &headers, output, select, main)
        }
        Some(Command::Source { header, output }) => commands::source(&options, header, output),
        Some(Command::Header { output }) => commands::header(&options, &output),
        Some(Command::Runner { output }) => commands::runner(&options, output),
        Some(Command::Makefile { output }) => commands::makefile(&options, output),
        // No command - show usage
        None => Err(CliError::failure("Error: no command given (see `fgen --help`)")),
    }
}

/// `-o` names one file, so it cannot be combined with several headers.
fn single_header_output(headers: &[PathBuf], output: Option<&PathBuf>) -> CliResult<()> {
    if output.is_some() && headers.len() > 1 {
        return Err(CliError::failure("Error: -o/--output can only be used with a single header"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
