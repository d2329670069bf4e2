//! Error types for the tracking core.
//!
//! The core (tracked files and the registry) reports failures through
//! [`TrackError`] so callers can tell a vanished file apart from a read
//! failure. Everything above the core (config, CLI, session I/O) uses
//! `anyhow` and wraps these with context.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures raised by tracked files and the registry.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The path does not exist, disappeared, or is not tracked.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that could not be found
        path: PathBuf,
    },

    /// Opening or reading the file failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The path exists but is not a regular file.
    #[error("not a regular file: {}", path.display())]
    NotAFile {
        /// Path that is a directory or other special file
        path: PathBuf,
    },

    /// The path is absolute or climbs out of the monitored folder.
    #[error("path is outside the monitored folder: {}", path.display())]
    OutsideFolder {
        /// Offending path
        path: PathBuf,
    },

    /// The extension is not one of the configured text or image extensions.
    #[error("unsupported file type: {}", path.display())]
    UnsupportedType {
        /// Path with the unrecognized extension
        path: PathBuf,
    },
}

impl TrackError {
    /// Maps an I/O error on `path`, turning `NotFound` into [`TrackError::NotFound`].
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Builds a [`TrackError::NotFound`] for `path`.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Returns true if this is a [`TrackError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::NotAFile { path }
            | Self::OutsideFolder { path }
            | Self::UnsupportedType { path } => path,
        }
    }
}

/// Result alias for core operations.
pub type Result<T, E = TrackError> = std::result::Result<T, E>;
