//! Tracked files and their derived statistics.
//!
//! A [`TrackedFile`] remembers two instants:
//!
//! - `created_at`, read from the filesystem when the file was added and never
//!   changed afterwards
//! - `snapshot_at`, the baseline recorded by the last commit, starting out
//!   equal to `created_at`
//!
//! Statistics are variant specific ([`FileStats`]) and are re-derived from
//! the file on every [`TrackedFile::describe`] call.

/// Placeholder image dimensions
pub mod image;
/// Text line, word and character counting
pub mod text;
/// Whole-second filesystem timestamps
pub mod timestamp;

pub use image::{Dimensions, ImageProfile, ImageStats};
pub use text::TextStats;
pub use timestamp::Timestamp;

use crate::error::{Result, TrackError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The kind of a tracked file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Plain text, summarized by line, word and character counts
    Text,
    /// Image, summarized by pixel dimensions
    Image,
}

impl FileKind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant-specific statistics of a tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStats {
    /// Counts for a text file
    Text(TextStats),
    /// Dimensions for an image file
    Image(ImageStats),
}

impl FileStats {
    /// Zeroed statistics for `kind`.
    #[must_use]
    pub fn for_kind(kind: FileKind, images: &ImageProfile) -> Self {
        match kind {
            FileKind::Text => Self::Text(TextStats::default()),
            FileKind::Image => Self::Image(ImageStats::new(images.clone())),
        }
    }

    /// The kind these statistics belong to.
    #[must_use]
    pub const fn kind(&self) -> FileKind {
        match self {
            Self::Text(_) => FileKind::Text,
            Self::Image(_) => FileKind::Image,
        }
    }
}

/// One monitored file.
#[derive(Debug, Clone)]
pub struct TrackedFile {
    /// Identifier the file is tracked under
    path: PathBuf,
    /// Where the file is read from
    location: PathBuf,
    created_at: Timestamp,
    snapshot_at: Timestamp,
    stats: FileStats,
}

impl TrackedFile {
    /// Starts tracking the file at `location` under the identifier `path`.
    ///
    /// Both `created_at` and `snapshot_at` are set to the creation time the
    /// filesystem reports for `location`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if the file does not exist or its
    /// metadata cannot be read, and [`TrackError::NotAFile`] for directories
    /// and other non-regular files.
    pub fn create(
        path: impl Into<PathBuf>,
        location: impl Into<PathBuf>,
        stats: FileStats,
    ) -> Result<Self> {
        let path = path.into();
        let location = location.into();

        let metadata = std::fs::metadata(&location).map_err(|_| TrackError::not_found(&path))?;
        if !metadata.is_file() {
            return Err(TrackError::NotAFile { path });
        }
        let created_at =
            Timestamp::created(&metadata).map_err(|e| TrackError::from_io(&path, e))?;

        debug!(path = %path.display(), kind = %stats.kind(), created = created_at.as_unix(), "Tracking file");

        Ok(Self {
            path,
            location,
            created_at,
            snapshot_at: created_at,
            stats,
        })
    }

    /// Identifier the file is tracked under.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filesystem location the file is read from.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Creation time captured when tracking started.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Baseline recorded by the last commit.
    #[must_use]
    pub const fn snapshot_at(&self) -> Timestamp {
        self.snapshot_at
    }

    /// Statistics as of the last refresh.
    #[must_use]
    pub const fn stats(&self) -> &FileStats {
        &self.stats
    }

    /// The kind of this file.
    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.stats.kind()
    }

    /// Reads the live modification time.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if the file has disappeared.
    pub fn current_modified_time(&self) -> Result<Timestamp> {
        let metadata =
            std::fs::metadata(&self.location).map_err(|e| self.map_io(e))?;
        Timestamp::modified(&metadata).map_err(|e| self.map_io(e))
    }

    /// Advances the snapshot to the live modification time and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if the file has disappeared; the
    /// snapshot is left unchanged in that case.
    pub fn mark_snapshot(&mut self) -> Result<Timestamp> {
        let modified = self.current_modified_time()?;
        self.set_snapshot(modified);
        Ok(modified)
    }

    /// Records an already-read modification time as the snapshot.
    pub(crate) fn set_snapshot(&mut self, at: Timestamp) {
        debug!(path = %self.path.display(), from = self.snapshot_at.as_unix(), to = at.as_unix(), "Snapshot advanced");
        self.snapshot_at = at;
    }

    /// Re-derives the statistics from the file's current state.
    ///
    /// # Errors
    ///
    /// Text files fail with [`TrackError::NotFound`] or [`TrackError::Io`]
    /// when their content cannot be read.
    pub fn refresh(&mut self) -> Result<()> {
        match &mut self.stats {
            FileStats::Text(stats) => stats
                .refresh(&self.location)
                .map_err(|e| rename_path(e, &self.path)),
            FileStats::Image(stats) => {
                stats.refresh(&self.location);
                Ok(())
            }
        }
    }

    /// Refreshes the statistics and renders the one-line summary.
    ///
    /// ```text
    /// Text File: notes.txt, Created: <ts>, Updated: <ts>, Lines: 3, Words: 6, Characters: 12
    /// Image File: photo.png, Created: <ts>, Updated: <ts>, Dimensions: 1024x860
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates [`TrackedFile::refresh`] failures.
    pub fn describe(&mut self) -> Result<String> {
        self.refresh()?;
        Ok(self.to_string())
    }

    fn map_io(&self, err: std::io::Error) -> TrackError {
        TrackError::from_io(&self.path, err)
    }
}

impl fmt::Display for TrackedFile {
    /// Renders the summary from the statistics as last refreshed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stats {
            FileStats::Text(stats) => write!(
                f,
                "Text File: {}, Created: {}, Updated: {}, Lines: {}, Words: {}, Characters: {}",
                self.path.display(),
                self.created_at,
                self.snapshot_at,
                stats.lines,
                stats.words,
                stats.characters
            ),
            FileStats::Image(stats) => write!(
                f,
                "Image File: {}, Created: {}, Updated: {}, Dimensions: {}",
                self.path.display(),
                self.created_at,
                self.snapshot_at,
                stats.dimensions
            ),
        }
    }
}

/// Reports errors under the tracked identifier instead of the resolved location.
fn rename_path(err: TrackError, path: &Path) -> TrackError {
    match err {
        TrackError::NotFound { .. } => TrackError::not_found(path),
        TrackError::Io { source, .. } => TrackError::Io {
            path: path.to_path_buf(),
            source,
        },
        TrackError::UnsupportedType { .. } => TrackError::UnsupportedType {
            path: path.to_path_buf(),
        },
        TrackError::NotAFile { .. } => TrackError::NotAFile {
            path: path.to_path_buf(),
        },
        TrackError::OutsideFolder { .. } => TrackError::OutsideFolder {
            path: path.to_path_buf(),
        },
    }
}
