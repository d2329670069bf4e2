//! One-shot listing of the monitored folder.
//!
//! Only regular files directly inside the folder are returned; there is no
//! recursion and no re-listing after startup.

use crate::registry::{AddOutcome, FileRegistry};
use crate::utils::{make_relative, should_ignore};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists the regular files directly inside `folder`, sorted by name.
///
/// Returned paths are relative to `folder`. Files matching
/// `ignore_patterns` are skipped, as are entries that cannot be read.
///
/// # Errors
///
/// Returns an error if `folder` is not a readable directory.
pub fn list_files(folder: &Path, ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        anyhow::bail!("Invalid folder path: {}", folder.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 means the folder itself could not be listed.
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("Failed to read folder: {}", folder.display()));
            }
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if should_ignore(entry.path(), ignore_patterns) {
            debug!(path = %entry.path().display(), "Ignored by pattern");
            continue;
        }
        files.push(make_relative(entry.path(), folder));
    }

    Ok(files)
}

/// Counts from [`populate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files now tracked
    pub tracked: usize,
    /// Files skipped because of their extension
    pub unsupported: usize,
}

/// Adds every listed file of the registry's folder to the registry.
///
/// # Errors
///
/// Returns an error if the folder cannot be listed or a listed file
/// disappears before it can be added.
pub fn populate(registry: &mut FileRegistry, ignore_patterns: &[String]) -> Result<ScanSummary> {
    let folder = registry.folder().to_path_buf();
    let mut summary = ScanSummary::default();

    for path in list_files(&folder, ignore_patterns)? {
        match registry
            .add(&path)
            .with_context(|| format!("Failed to track {}", path.display()))?
        {
            AddOutcome::Tracked(_) | AddOutcome::Replaced(_) => summary.tracked += 1,
            AddOutcome::Unsupported => summary.unsupported += 1,
        }
    }

    debug!(
        folder = %folder.display(),
        tracked = summary.tracked,
        unsupported = summary.unsupported,
        "Initial scan complete"
    );
    Ok(summary)
}
