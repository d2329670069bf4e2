//! Whole-second filesystem timestamps.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

/// Display format for timestamps, e.g. `Mon Oct 19 09:05:01 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// A point in time with one-second resolution, stored as Unix seconds.
///
/// Change detection compares these values, so sub-second differences between
/// two metadata reads never count as a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from Unix seconds.
    #[must_use]
    pub const fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    /// Unix seconds.
    #[must_use]
    pub const fn as_unix(self) -> i64 {
        self.0
    }

    /// Truncates a `SystemTime` to whole seconds.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        Self(DateTime::<Utc>::from(time).timestamp())
    }

    /// Last modification time from file metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform does not report modification times.
    pub fn modified(metadata: &Metadata) -> io::Result<Self> {
        metadata.modified().map(Self::from_system_time)
    }

    /// Creation time from file metadata.
    ///
    /// On unix this is the inode change time, which every content write
    /// also bumps to the same instant as the modification time.
    ///
    /// # Errors
    ///
    /// Infallible on unix; elsewhere fails if the filesystem has no birth time.
    #[cfg(unix)]
    pub fn created(metadata: &Metadata) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;
        Ok(Self(metadata.ctime()))
    }

    /// Creation time from file metadata.
    ///
    /// # Errors
    ///
    /// Fails if the filesystem does not record a birth time.
    #[cfg(not(unix))]
    pub fn created(metadata: &Metadata) -> io::Result<Self> {
        metadata.created().map(Self::from_system_time)
    }

    /// Local date-time for display, if representable.
    #[must_use]
    pub fn to_local(self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.0, 0).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(local) => write!(f, "{}", local.format(TIMESTAMP_FORMAT)),
            None => write!(f, "@{}", self.0),
        }
    }
}
