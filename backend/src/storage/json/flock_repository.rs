use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::fs;
use tracing::{debug, error, info, warn};

use super::connection::JsonConnection;
use crate::domain::models::flock::Flock;
use crate::io::rest::mappers::flock_mapper::FlockMapper;
use crate::storage::FlockStorage;

/// Flock repository backed by a single pretty-printed JSON document
///
/// File access is blocking, so the async trait methods hand it to tokio's
/// blocking pool.
#[derive(Clone)]
pub struct FlockRepository {
    connection: JsonConnection,
}

impl FlockRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Raw document text, or `None` when nothing has been stored yet
    fn read_content(&self) -> Result<Option<String>> {
        let path = self.connection.data_file();

        if !path.exists() {
            debug!("Data file {} doesn't exist yet", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            debug!("Data file {} is empty", path.display());
            return Ok(None);
        }

        Ok(Some(content))
    }

    fn decode(content: &str) -> Result<Vec<Flock>> {
        let shared_flocks: Vec<shared::Flock> =
            serde_json::from_str(content).context("Failed to parse flock data")?;

        shared_flocks
            .into_iter()
            .map(FlockMapper::to_domain)
            .collect()
    }

    /// Move an undecodable document aside so the next save cannot overwrite it
    fn preserve_corrupt_document(&self) {
        let path = self.connection.data_file();
        let backup = self.connection.corrupt_backup_file(Utc::now());

        match fs::rename(path, &backup) {
            Ok(()) => error!(
                "Moved unreadable flock data {} to {}",
                path.display(),
                backup.display()
            ),
            Err(e) => error!(
                "Failed to move unreadable flock data {} aside: {}",
                path.display(),
                e
            ),
        }
    }

    fn load_blocking(&self) -> Vec<Flock> {
        let content = match self.read_content() {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Error reading flock data, treating it as empty: {:#}", e);
                return Vec::new();
            }
        };

        match Self::decode(&content) {
            Ok(flocks) => {
                debug!("Loaded {} flocks", flocks.len());
                flocks
            }
            Err(e) => {
                error!("Error decoding flock data, treating it as empty: {:#}", e);
                self.preserve_corrupt_document();
                Vec::new()
            }
        }
    }

    fn save_blocking(&self, flocks: Vec<Flock>) -> Result<()> {
        let path = self.connection.data_file();
        let temp_path = self.connection.temp_file();
        let count = flocks.len();

        let shared_flocks = FlockMapper::to_dto_list(flocks);
        let json = serde_json::to_string_pretty(&shared_flocks)
            .context("Failed to serialize flock data")?;

        // Atomic write using temp file
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        if let Err(e) = fs::rename(&temp_path, path) {
            warn!("Rename of {} failed, removing temp file", temp_path.display());
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
        }

        info!("Saved {} flocks to {}", count, path.display());
        Ok(())
    }
}

#[async_trait]
impl FlockStorage for FlockRepository {
    async fn load_flocks(&self) -> Vec<Flock> {
        let repo = self.clone();
        match tokio::task::spawn_blocking(move || repo.load_blocking()).await {
            Ok(flocks) => flocks,
            Err(e) => {
                error!("Flock data load task failed, treating it as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn save_flocks(&self, flocks: &[Flock]) -> Result<()> {
        let repo = self.clone();
        let flocks = flocks.to_vec();
        tokio::task::spawn_blocking(move || repo.save_blocking(flocks))
            .await
            .context("Flock data save task failed")?
    }
}
