//! Command-line interface definitions for fmon.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes,
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Main CLI structure for fmon.
#[derive(Parser)]
#[command(
    name = "fmon",
    version = crate::VERSION,
    about = "Snapshot-based folder monitor",
    long_about = "Tracks the files of a folder, reports which changed since the last snapshot, \
                  and shows line/word/character counts for text files and dimensions for images"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file to use
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session over a folder
    Monitor {
        /// Folder to monitor
        folder: String,
    },

    /// Show statistics for one file, or every tracked file
    Info {
        /// Folder to scan
        folder: String,

        /// File to describe (all files when omitted)
        file: Option<String>,
    },

    /// Show which files changed since they were discovered
    Status {
        /// Folder to scan
        folder: String,

        /// Only list changed files
        #[arg(short, long)]
        changed: bool,

        /// Short format
        #[arg(short, long)]
        short: bool,
    },

    /// Poll a folder and report changed files on an interval
    Watch {
        /// Folder to watch
        folder: String,

        /// Time between polls, e.g. "5s" or "1m" (defaults to the config value)
        #[arg(short, long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,

        /// Stop after this many polls
        #[arg(short = 'n', long)]
        iterations: Option<u64>,
    },

    /// Get and set configuration options
    Config {
        /// Configuration key (section.name)
        key: Option<String>,

        /// Value to set
        value: Option<String>,

        /// Reset the key to its default
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
