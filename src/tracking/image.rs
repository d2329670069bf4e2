//! Image dimensions.
//!
//! No decoding happens here. Files whose extension is recognized get a fixed
//! placeholder size; anything else reports `0x0`.

use crate::utils::extension_of;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Placeholder reported for recognized image files.
    pub const PLACEHOLDER: Self = Self::new(1024, 860);

    /// Creates dimensions from width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which extensions count as images and what size they report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProfile {
    /// Lowercase extensions without the leading dot
    pub extensions: Vec<String>,
    /// Size reported for recognized files
    pub placeholder: Dimensions,
}

impl Default for ImageProfile {
    fn default() -> Self {
        Self {
            extensions: vec!["png".to_string(), "jpg".to_string()],
            placeholder: Dimensions::PLACEHOLDER,
        }
    }
}

impl ImageProfile {
    /// Whether `path` has one of the recognized extensions (case-insensitive).
    #[must_use]
    pub fn recognizes(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Dimensions derived for an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStats {
    /// Current dimensions, zero until refreshed
    pub dimensions: Dimensions,
    profile: ImageProfile,
}

impl ImageStats {
    /// Creates zeroed stats that derive dimensions using `profile`.
    #[must_use]
    pub fn new(profile: ImageProfile) -> Self {
        Self {
            dimensions: Dimensions::default(),
            profile,
        }
    }

    /// Sets the placeholder size for recognized extensions, zero otherwise.
    pub fn refresh(&mut self, path: &Path) {
        self.dimensions = if self.profile.recognizes(path) {
            self.profile.placeholder
        } else {
            Dimensions::default()
        };
    }
}

impl Default for ImageStats {
    fn default() -> Self {
        Self::new(ImageProfile::default())
    }
}
