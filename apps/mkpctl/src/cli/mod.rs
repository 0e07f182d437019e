//! # mkpctl CLI Module
//!
//! This module implements the CLI interface for mkpctl.
//!
//! ## Available Commands
//!
//! - `validate` - Load and validate a pack, print the report
//! - `classify` - Map an error message or exit code to its class

mod commands;

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// mkpctl - Knowledge Pack Loader
///
/// Loads a Core scope and its Modules, validates every record and reports
/// statistics or the first failure as a stable exit code.
#[derive(Parser, Debug)]
#[command(name = "mkpctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the text report on success
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate a pack
    Validate {
        /// Dataset root containing core/ and modules/
        #[arg(short, long)]
        root: PathBuf,

        /// Number of entries in the top-predicates report
        #[arg(short, long)]
        limit: Option<usize>,

        /// Program to receive the JSON report on success
        #[arg(long)]
        helper: Option<String>,
    },

    /// Classify an error message or exit code
    #[command(group(ArgGroup::new("input").required(true).args(["message", "code"])))]
    Classify {
        /// Rendered error message
        #[arg(short, long)]
        message: Option<String>,

        /// Exit code
        #[arg(long, allow_negative_numbers = true)]
        code: Option<i32>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments. Returns the process exit code.
pub fn execute(cli: Cli) -> i32 {
    let output = OutputMode {
        json: cli.json_mode,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Validate {
            root,
            limit,
            helper,
        } => cmd_validate(
            &ValidateArgs {
                root,
                config: cli.config,
                limit,
                helper,
            },
            output,
        ),
        Commands::Classify { message, code } => {
            cmd_classify(message.as_deref(), code, output)
        }
    }
}
