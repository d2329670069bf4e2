pub mod parser;

use crate::registry::{CommitPolicy, StatusBaseline};
use crate::tracking::Dimensions;
use crate::utils::normalize_extension;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Every key accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "tracking.text_extensions",
    "tracking.image_extensions",
    "tracking.ignore_patterns",
    "image.placeholder_width",
    "image.placeholder_height",
    "status.baseline",
    "commit.policy",
    "session.pause_after_command_ms",
    "session.watch_interval_secs",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Which files are tracked and how they are classified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackingConfig {
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    /// Glob patterns matched against file names during the startup scan
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageConfig {
    #[serde(default = "default_placeholder_width")]
    pub placeholder_width: u32,
    #[serde(default = "default_placeholder_height")]
    pub placeholder_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default)]
    pub baseline: StatusBaseline,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CommitConfig {
    #[serde(default)]
    pub policy: CommitPolicy,
}

/// Cadence of the interactive session and the watch loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default)]
    pub pause_after_command_ms: u64,
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
            image_extensions: default_image_extensions(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            placeholder_width: default_placeholder_width(),
            placeholder_height: default_placeholder_height(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pause_after_command_ms: 0,
            watch_interval_secs: default_watch_interval_secs(),
        }
    }
}

impl ImageConfig {
    /// Placeholder dimensions reported for recognized image files.
    #[must_use]
    pub const fn placeholder(&self) -> Dimensions {
        Dimensions::new(self.placeholder_width, self.placeholder_height)
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn pause_after_command(&self) -> Duration {
        Duration::from_millis(self.pause_after_command_ms)
    }

    #[must_use]
    pub const fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs)
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create default config if it doesn't exist
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let (section, name) = key.split_once('.')?;

        match (section, name) {
            ("tracking", "text_extensions") => Some(self.tracking.text_extensions.join(",")),
            ("tracking", "image_extensions") => Some(self.tracking.image_extensions.join(",")),
            ("tracking", "ignore_patterns") => Some(self.tracking.ignore_patterns.join(",")),
            ("image", "placeholder_width") => Some(self.image.placeholder_width.to_string()),
            ("image", "placeholder_height") => Some(self.image.placeholder_height.to_string()),
            ("status", "baseline") => Some(enum_value(&self.status.baseline)),
            ("commit", "policy") => Some(enum_value(&self.commit.policy)),
            ("session", "pause_after_command_ms") => {
                Some(self.session.pause_after_command_ms.to_string())
            }
            ("session", "watch_interval_secs") => {
                Some(self.session.watch_interval_secs.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// List values are comma separated. The updated configuration is
    /// validated before being kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, name) = key
            .split_once('.')
            .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {key}"))?;

        let mut updated = self.clone();
        match (section, name) {
            ("tracking", "text_extensions") => {
                updated.tracking.text_extensions = split_extensions(value);
            }
            ("tracking", "image_extensions") => {
                updated.tracking.image_extensions = split_extensions(value);
            }
            ("tracking", "ignore_patterns") => {
                updated.tracking.ignore_patterns = split_list(value);
            }
            ("image", "placeholder_width") => {
                updated.image.placeholder_width = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            ("image", "placeholder_height") => {
                updated.image.placeholder_height = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            ("status", "baseline") => {
                updated.status.baseline = parse_enum(value)
                    .with_context(|| format!("Invalid baseline (created, snapshot): {value}"))?;
            }
            ("commit", "policy") => {
                updated.commit.policy = parse_enum(value).with_context(|| {
                    format!("Invalid commit policy (fail-fast, skip-and-report): {value}")
                })?;
            }
            ("session", "pause_after_command_ms") => {
                updated.session.pause_after_command_ms = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            ("session", "watch_interval_secs") => {
                updated.session.watch_interval_secs = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }

        parser::validate_config(&updated)?;
        *self = updated;
        Ok(())
    }

    /// Reset a configuration value to its default
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = Self::default();
        match defaults.get(key) {
            Some(value) => self.set(key, &value),
            None => Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
    }

    /// Lowercases extensions and strips leading dots.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.tracking.text_extensions,
            &mut self.tracking.image_extensions,
        ] {
            *list = list.iter().map(|e| normalize_extension(e)).collect();
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_extensions(value: &str) -> Vec<String> {
    split_list(value)
        .iter()
        .map(|e| normalize_extension(e))
        .collect()
}

/// Renders a unit enum the way it appears in the TOML file.
fn enum_value<T: Serialize>(value: &T) -> String {
    toml::Value::try_from(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn parse_enum<T: for<'de> Deserialize<'de>>(value: &str) -> Result<T> {
    Ok(toml::Value::String(value.trim().to_string()).try_into()?)
}

// Default functions for serde
fn default_text_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

fn default_image_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    vec!["*.swp".to_string(), "*.tmp".to_string()]
}

const fn default_placeholder_width() -> u32 {
    Dimensions::PLACEHOLDER.width
}

const fn default_placeholder_height() -> u32 {
    Dimensions::PLACEHOLDER.height
}

const fn default_watch_interval_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/config.toml");

        let config = Config::load(&path)?;
        assert_eq!(config, Config::default());
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.status.baseline = StatusBaseline::Snapshot;
        config.commit.policy = CommitPolicy::SkipAndReport;
        config.tracking.text_extensions.push("md".to_string());
        config.save(&path)?;

        let loaded = Config::load(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_get_and_set() -> Result<()> {
        let mut config = Config::default();
        assert_eq!(config.get("status.baseline").as_deref(), Some("created"));
        assert_eq!(config.get("commit.policy").as_deref(), Some("fail-fast"));

        config.set("status.baseline", "snapshot")?;
        assert_eq!(config.status.baseline, StatusBaseline::Snapshot);

        config.set("tracking.text_extensions", ".TXT, md")?;
        assert_eq!(config.tracking.text_extensions, vec!["txt", "md"]);

        config.set("image.placeholder_width", "640")?;
        assert_eq!(config.image.placeholder().to_string(), "640x860");
        Ok(())
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("status.baseline", "yesterday").is_err());
        assert!(config.set("image.placeholder_width", "wide").is_err());
        assert!(config.set("nonsense", "1").is_err());
        assert!(config.set("tracking.unknown", "1").is_err());
        assert!(config.set("session.watch_interval_secs", "0").is_err());
        assert!(config.set("tracking.image_extensions", "txt").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unset_restores_default() -> Result<()> {
        let mut config = Config::default();
        config.set("commit.policy", "skip-and-report")?;
        config.unset("commit.policy")?;
        assert_eq!(config.commit.policy, CommitPolicy::FailFast);
        assert!(config.unset("user.name").is_err());
        Ok(())
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing getter for {key}");
        }
    }
}
