#![warn(missing_docs)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::cast_possible_truncation)] // Counters are reported as u64
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # Foldermon - Snapshot-Based Folder Monitor
//!
//! Foldermon tracks the files of one folder and reports, on request, which
//! of them changed since they were discovered, along with statistics derived
//! from their current content.
//!
//! ## Features
//!
//! - **Commit snapshots**: record the current modification time of every file
//! - **Status**: list files whose modification time moved away from the baseline
//! - **Per-file info**: line, word and character counts for text files,
//!   dimensions for images
//! - **Interactive session**: a command loop over one folder
//!
//! ## Architecture
//!
//! - [`tracking`]: one tracked file and its derived statistics
//! - [`registry`]: the set of tracked files and the bulk operations
//! - [`scanner`]: the one-shot listing of the monitored folder
//! - [`session`]: the interactive command loop
//! - [`commands`]: CLI command implementations
//! - [`config`]: configuration parsing and validation
//!
//! ## Example Usage
//!
//! ```no_run
//! use foldermon::registry::FileRegistry;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut registry = FileRegistry::new("/path/to/folder");
//! registry.add("notes.txt")?;
//!
//! registry.commit_all()?;
//! for entry in registry.status()? {
//!     println!("{entry}");
//! }
//! println!("{}", registry.describe_one("notes.txt")?);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Error types for the tracking core.
pub mod error;

/// Logging initialisation.
pub mod logging;

/// Output formatting and styling.
pub mod output;

/// The set of tracked files.
pub mod registry;

/// Folder listing.
pub mod scanner;

/// Interactive command loop.
pub mod session;

/// Tracked files and their statistics.
pub mod tracking;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use error::TrackError;
pub use registry::FileRegistry;
pub use tracking::TrackedFile;

/// Current version of the fmon binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/foldermon/config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "FOLDERMON_CONFIG_PATH";

/// Central context for all foldermon commands.
///
/// Holds the configuration and where it was loaded from.
///
/// # Examples
///
/// ```no_run
/// use foldermon::MonitorContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Default location (or FOLDERMON_CONFIG_PATH)
/// let ctx = MonitorContext::new(None)?;
///
/// // Explicit location (for testing)
/// let ctx = MonitorContext::new_explicit("/tmp/foldermon/config.toml".into())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MonitorContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl MonitorContext {
    /// Creates a context, resolving the config path from the environment,
    /// then `config_override`, then the default location.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the
    /// configuration file cannot be read or created.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else if let Some(path) = config_override {
            path
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        Self::new_explicit(config_path)
    }

    /// Creates a context from an explicit config path, creating a default
    /// config there if none exists.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
        tracing::debug!(path = %config_path.display(), "Configuration loaded");

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a registry for `folder` and adds every file found in it.
    ///
    /// # Errors
    /// Returns an error if `folder` is not a directory or a file cannot be added.
    pub fn open_registry(&self, folder: &Path) -> Result<FileRegistry> {
        let mut registry = FileRegistry::with_config(folder, &self.config);
        let summary = scanner::populate(&mut registry, &self.config.tracking.ignore_patterns)?;
        output::verbose(&format!(
            "Tracking {} file(s) in {} ({} unsupported)",
            summary.tracked,
            folder.display(),
            summary.unsupported
        ));
        Ok(registry)
    }
}
