//! The set of tracked files.
//!
//! [`FileRegistry`] owns one [`TrackedFile`] per identifier, classifies new
//! paths by extension, and runs the bulk operations: commit, describe and
//! status. It never lists the monitored folder itself; callers feed it paths
//! (see [`crate::scanner`]).

use crate::config::Config;
use crate::error::{Result, TrackError};
use crate::tracking::{FileKind, FileStats, ImageProfile, Timestamp, TrackedFile};
use crate::utils::extension_of;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{Level, debug, info, span, warn};

/// What `status` compares the live modification time against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBaseline {
    /// The creation time captured when tracking started; commits do not
    /// clear a change
    #[default]
    Created,
    /// The snapshot recorded by the last commit
    Snapshot,
}

/// How `commit_all` handles files whose modification time cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPolicy {
    /// Abort on the first failure without changing any snapshot
    #[default]
    FailFast,
    /// Commit what can be read and report the rest
    SkipAndReport,
}

/// Classification and comparison rules used by a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Lowercase extensions tracked as text
    pub text_extensions: Vec<String>,
    /// Image extensions and placeholder size
    pub images: ImageProfile,
    /// Baseline for change detection
    pub baseline: StatusBaseline,
    /// Failure handling for commits
    pub commit_policy: CommitPolicy,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            text_extensions: vec!["txt".to_string()],
            images: ImageProfile::default(),
            baseline: StatusBaseline::default(),
            commit_policy: CommitPolicy::default(),
        }
    }
}

impl RegistryOptions {
    /// Builds options from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            text_extensions: config.tracking.text_extensions.clone(),
            images: ImageProfile {
                extensions: config.tracking.image_extensions.clone(),
                placeholder: config.image.placeholder(),
            },
            baseline: config.status.baseline,
            commit_policy: config.commit.policy,
        }
    }

    /// Decides the kind of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::UnsupportedType`] for any other extension.
    pub fn classify(&self, path: &Path) -> Result<FileKind> {
        match extension_of(path) {
            Some(ext) if self.text_extensions.contains(&ext) => Ok(FileKind::Text),
            Some(ext) if self.images.extensions.contains(&ext) => Ok(FileKind::Image),
            _ => Err(TrackError::UnsupportedType {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Result of [`FileRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created
    Tracked(FileKind),
    /// An existing entry was replaced and its lifecycle restarted
    Replaced(FileKind),
    /// The extension is not supported; nothing was tracked
    Unsupported,
}

/// Change state of one tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Identifier of the file
    pub path: PathBuf,
    /// Whether the live modification time differs from the baseline
    pub changed: bool,
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changed {
            write!(
                f,
                "File '{}' has been changed since the last snapshot.",
                self.path.display()
            )
        } else {
            write!(f, "File '{}' is unchanged.", self.path.display())
        }
    }
}

/// Result of [`FileRegistry::commit_all`].
#[derive(Debug, Default)]
pub struct CommitReport {
    /// Number of files whose snapshot was advanced
    pub committed: usize,
    /// Files left untouched under [`CommitPolicy::SkipAndReport`]
    pub skipped: Vec<TrackError>,
}

impl CommitReport {
    /// True when every tracked file was committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Owns the tracked files of one monitored folder.
#[derive(Debug)]
pub struct FileRegistry {
    folder: PathBuf,
    entries: BTreeMap<PathBuf, TrackedFile>,
    options: RegistryOptions,
}

impl FileRegistry {
    /// Creates an empty registry with default options.
    ///
    /// Relative paths passed to [`FileRegistry::add`] are resolved against
    /// `folder`.
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::with_options(folder, RegistryOptions::default())
    }

    /// Creates an empty registry using the rules from `config`.
    #[must_use]
    pub fn with_config(folder: impl Into<PathBuf>, config: &Config) -> Self {
        Self::with_options(folder, RegistryOptions::from_config(config))
    }

    /// Creates an empty registry with explicit options.
    #[must_use]
    pub fn with_options(folder: impl Into<PathBuf>, options: RegistryOptions) -> Self {
        Self {
            folder: folder.into(),
            entries: BTreeMap::new(),
            options,
        }
    }

    /// The monitored folder.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Number of tracked files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` is tracked.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Looks up a tracked file.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&TrackedFile> {
        self.entries.get(path.as_ref())
    }

    /// Tracked files in iteration order (sorted by identifier).
    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.entries.values()
    }

    /// Starts tracking `path`, replacing any existing entry for it.
    ///
    /// Unsupported extensions are not an error: nothing is tracked and
    /// [`AddOutcome::Unsupported`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::OutsideFolder`] for absolute paths or paths
    /// containing `..`, [`TrackError::NotFound`] if a supported file does not
    /// exist, and [`TrackError::NotAFile`] if it is not a regular file.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<AddOutcome> {
        let path = path.as_ref();
        if !stays_inside(path) {
            return Err(TrackError::OutsideFolder {
                path: path.to_path_buf(),
            });
        }
        let kind = match self.options.classify(path) {
            Ok(kind) => kind,
            Err(TrackError::UnsupportedType { .. }) => {
                debug!(path = %path.display(), "Ignoring unsupported file type");
                return Ok(AddOutcome::Unsupported);
            }
            Err(e) => return Err(e),
        };

        let location = self.folder.join(path);
        let file = TrackedFile::create(
            path,
            location,
            FileStats::for_kind(kind, &self.options.images),
        )?;

        let outcome = match self.entries.insert(path.to_path_buf(), file) {
            Some(_) => AddOutcome::Replaced(kind),
            None => AddOutcome::Tracked(kind),
        };
        debug!(path = %path.display(), ?outcome, "Added file");
        Ok(outcome)
    }

    /// Stops tracking `path`. Returns whether it was tracked.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let removed = self.entries.remove(path).is_some();
        debug!(path = %path.display(), removed, "Removed file");
        removed
    }

    /// Advances every snapshot to the file's live modification time.
    ///
    /// Under [`CommitPolicy::FailFast`] all modification times are read
    /// before any snapshot changes, so a failure leaves every file as it was.
    ///
    /// # Errors
    ///
    /// Under [`CommitPolicy::FailFast`], returns the first
    /// [`TrackError::NotFound`] encountered.
    pub fn commit_all(&mut self) -> Result<CommitReport> {
        let span = span!(Level::DEBUG, "commit", files = self.entries.len());
        let _guard = span.enter();

        let report = match self.options.commit_policy {
            CommitPolicy::FailFast => {
                let stamps = self
                    .entries
                    .values()
                    .map(TrackedFile::current_modified_time)
                    .collect::<Result<Vec<Timestamp>>>()?;
                for (file, at) in self.entries.values_mut().zip(stamps) {
                    file.set_snapshot(at);
                }
                CommitReport {
                    committed: self.entries.len(),
                    skipped: Vec::new(),
                }
            }
            CommitPolicy::SkipAndReport => {
                let mut report = CommitReport::default();
                for file in self.entries.values_mut() {
                    match file.mark_snapshot() {
                        Ok(_) => report.committed += 1,
                        Err(e) => {
                            warn!(path = %file.path().display(), error = %e, "Skipping file during commit");
                            report.skipped.push(e);
                        }
                    }
                }
                report
            }
        };

        info!(
            committed = report.committed,
            skipped = report.skipped.len(),
            "Commit finished"
        );
        Ok(report)
    }

    /// Describes one tracked file with freshly derived statistics.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if `path` is not tracked, otherwise
    /// propagates the file's refresh failure.
    pub fn describe_one(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        self.entries
            .get_mut(path)
            .ok_or_else(|| TrackError::not_found(path))?
            .describe()
    }

    /// Describes every tracked file in iteration order.
    ///
    /// # Errors
    ///
    /// Stops at the first file whose statistics cannot be derived.
    pub fn describe_all(&mut self) -> Result<Vec<String>> {
        self.entries.values_mut().map(TrackedFile::describe).collect()
    }

    /// Reports, for every tracked file, whether it changed against the
    /// configured baseline.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if a tracked file has disappeared.
    pub fn status(&self) -> Result<Vec<StatusEntry>> {
        let span = span!(Level::DEBUG, "status", baseline = ?self.options.baseline);
        let _guard = span.enter();

        self.entries
            .values()
            .map(|file| {
                let baseline = match self.options.baseline {
                    StatusBaseline::Created => file.created_at(),
                    StatusBaseline::Snapshot => file.snapshot_at(),
                };
                let modified = file.current_modified_time()?;
                Ok(StatusEntry {
                    path: file.path().to_path_buf(),
                    changed: modified != baseline,
                })
            })
            .collect()
    }

    /// Identifiers of the files that changed against the baseline.
    ///
    /// # Errors
    ///
    /// Same as [`FileRegistry::status`].
    pub fn changed(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .status()?
            .into_iter()
            .filter(|entry| entry.changed)
            .map(|entry| entry.path)
            .collect())
    }
}

/// True when `path` is relative and never steps above its starting folder.
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
