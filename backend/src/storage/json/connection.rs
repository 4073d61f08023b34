use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// JsonConnection owns the location of the flock document on disk
#[derive(Clone, Debug)]
pub struct JsonConnection {
    data_file: PathBuf,
}

impl JsonConnection {
    /// Create a connection for `data_file`, creating its parent directory if
    /// needed. The file itself is only created by the first write.
    pub fn new<P: AsRef<Path>>(data_file: P) -> Result<Self> {
        let data_file = data_file.as_ref().to_path_buf();

        if let Some(parent) = data_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory {}", parent.display())
                })?;
                info!("Created data directory: {}", parent.display());
            }
        }

        Ok(Self { data_file })
    }

    /// Create a connection inside `directory` using the default file name
    pub fn in_directory<P: AsRef<Path>>(directory: P) -> Result<Self> {
        Self::new(directory.as_ref().join(crate::config::DEFAULT_DATA_FILE))
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sibling path used for write-then-rename
    pub fn temp_file(&self) -> PathBuf {
        self.data_file.with_extension("json.tmp")
    }

    /// Sibling path an undecodable document is moved to,
    /// e.g. `flock_data.json.corrupt-20240301T060000.000`
    pub fn corrupt_backup_file(&self, now: DateTime<Utc>) -> PathBuf {
        let file_name = self
            .data_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| crate::config::DEFAULT_DATA_FILE.to_string());
        self.data_file.with_file_name(format!(
            "{}.corrupt-{}",
            file_name,
            now.format("%Y%m%dT%H%M%S%.3f")
        ))
    }
}
