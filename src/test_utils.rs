#[cfg(test)]
pub mod fixtures {
    use crate::registry::FileRegistry;
    use anyhow::Result;
    use filetime::FileTime;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A temporary folder to monitor.
    pub struct TestFolder {
        pub temp_dir: TempDir,
    }

    impl TestFolder {
        pub fn new() -> Result<Self> {
            Ok(Self {
                temp_dir: tempfile::tempdir()?,
            })
        }

        pub fn path(&self) -> &Path {
            self.temp_dir.path()
        }

        pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
            let path = self.temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            Ok(path)
        }

        pub fn remove_file(&self, name: &str) -> Result<()> {
            fs::remove_file(self.temp_dir.path().join(name))?;
            Ok(())
        }

        /// Sets the modification time to `secs` seconds after the epoch.
        pub fn set_mtime(&self, name: &str, secs: i64) -> Result<()> {
            let path = self.temp_dir.path().join(name);
            filetime::set_file_mtime(&path, FileTime::from_unix_time(secs, 0))?;
            Ok(())
        }

        pub fn registry(&self) -> FileRegistry {
            FileRegistry::new(self.temp_dir.path())
        }
    }
}
