//! Command-line argument definitions for the FGD CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The subcommand picks the action; the global options select
//! the configuration file and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the FGD tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and report every skipped or repaired line
    Check {
        /// Path to the FGD file
        input: String,
    },

    /// Rewrite a file in canonical form
    Format {
        /// Path to the FGD file
        input: String,

        /// Where to write the result; standard output when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write a starter document
    New {
        /// Where to write the document; standard output when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}
