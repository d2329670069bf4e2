pub mod config;
pub mod info;
pub mod monitor;
pub mod status;
pub mod watch;

use crate::utils::expand_tilde;
use anyhow::Result;
use std::path::PathBuf;

/// Resolves the folder argument, expanding a leading `~`.
///
/// # Errors
///
/// Returns an error if the argument is empty or not a directory.
pub fn resolve_folder(folder: &str) -> Result<PathBuf> {
    let path = expand_tilde(folder)?;
    if !path.is_dir() {
        anyhow::bail!("Invalid folder path: {}", path.display());
    }
    Ok(path)
}
