//! CLI structure definition.
//!
//! This module defines the command-line interface using clap's derive
//! macros. The tool takes one or more command names and resolves each to
//! an absolute canonical path.

use clap::Parser;

/// Command-line tool for locating executables on the search path.
#[derive(Parser)]
#[command(name = "cmdpath")]
#[command(version, about = "Locate commands on the search path", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Command names or paths to resolve
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}
