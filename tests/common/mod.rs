#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use filetime::FileTime;
use foldermon::FileRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A modification time far in the past, used to mark files as changed.
pub const PAST: i64 = 1_000_000_000;

/// Test folder fixture with its own configuration file
pub struct TestFolder {
    pub temp_dir: TempDir,
}

impl TestFolder {
    /// Create an empty folder to monitor
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("watched"))?;
        Ok(Self { temp_dir })
    }

    /// The monitored folder
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("watched")
    }

    /// Configuration file used by [`TestFolder::fmon`]
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_bytes(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn remove_file(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path().join(name))?;
        Ok(())
    }

    pub fn set_mtime(&self, name: &str, secs: i64) -> Result<()> {
        set_mtime(&self.path().join(name), secs)
    }

    pub fn registry(&self) -> FileRegistry {
        FileRegistry::new(self.path())
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.config_path(), content)?;
        Ok(())
    }

    /// The `fmon` binary, isolated from the user's config and log settings
    pub fn fmon(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("fmon")?;
        cmd.env("HOME", self.temp_dir.path())
            .env("FOLDERMON_CONFIG_PATH", self.config_path())
            .env_remove("FOLDERMON_LOG")
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}

pub fn set_mtime(path: &Path, secs: i64) -> Result<()> {
    filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0))?;
    Ok(())
}
