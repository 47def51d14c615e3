use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Versioned slot file holding the entire entry collection. The name
/// matches the v2 storage key the data format was introduced with.
pub const ENTRIES_SLOT_FILE: &str = "novel_writing_entries_v2.json";

/// JsonConnection manages the data directory and the path of the single
/// durable slot file.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection rooted at a base directory, creating
    /// the directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory,
    /// ~/Documents/Writing Receipt (falling back to the home directory
    /// when Documents cannot be resolved).
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = parent.join("Writing Receipt");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Path of the durable slot file.
    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory.join(ENTRIES_SLOT_FILE)
    }

    /// The data directory this connection is rooted at.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("data");
        assert!(!dir.exists());

        let connection = JsonConnection::new(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(
            connection.entries_file_path(),
            dir.join(ENTRIES_SLOT_FILE)
        );
    }
}
