//! Utility functions and helpers.
//!
//! - Path manipulation (tilde expansion, relative paths)
//! - Extension lookup used to classify files
//! - Ignore pattern matching
//!
//! # Examples
//!
//! ```
//! use foldermon::utils::{expand_tilde, extension_of};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let path = expand_tilde("~/notes")?;
//! assert_eq!(extension_of(Path::new("Photo.PNG")).as_deref(), Some("png"));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expands a path starting with `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home);
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Make `path` relative to `base` if possible, otherwise return `path` as is.
#[must_use]
pub fn make_relative(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// Lowercase extension of `path` without the leading dot.
#[must_use]
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Normalizes a configured extension: trims, drops a leading dot, lowercases.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Determines if a file should be ignored based on glob patterns.
///
/// Patterns are matched against the file name only, so `*.swp` ignores swap
/// files regardless of the folder. Invalid patterns are skipped with a warning.
#[must_use]
pub fn should_ignore(path: &Path, patterns: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    patterns.iter().any(|raw| match Pattern::new(raw) {
        Ok(pattern) => pattern.matches_with(name, options),
        Err(e) => {
            warn!(pattern = %raw, error = %e, "Skipping invalid ignore pattern");
            false
        }
    })
}
