//! Record service: the create/read/update/delete contract over the flock
//! document.
//!
//! Each operation validates its input first, then loads the whole document,
//! mutates it in memory and writes it back once. Validation and not-found
//! failures return before anything is written.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::commands::records::{
    DeleteRecordCommand, DeleteRecordResult, RecordResult, SaveRecordCommand, UpdateRecordCommand,
};
use crate::domain::models::flock::{self, Flock, Observation};
use crate::storage::FlockStorage;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to persist flock data: {0:#}")]
    Storage(anyhow::Error),
}

pub type RecordServiceResult<T> = std::result::Result<T, RecordError>;

/// Service owning the load-mutate-save cycle for flock records
#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn FlockStorage>,
    /// Serializes writers within this process
    write_lock: Arc<Mutex<()>>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn FlockStorage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Save the observations for one day, creating the flock on first use
    pub async fn save_record(&self, command: SaveRecordCommand) -> RecordServiceResult<RecordResult> {
        info!(
            "Saving record: flock={:?}, day={:?}",
            command.flock_id, command.day
        );

        let flock_id = require_flock_id(command.flock_id.as_deref())?;
        let day = require_day(command.day)?;
        let breeder_name = command
            .breeder_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                RecordError::Validation(
                    "Incomplete data: flockId, day and breederName are required".to_string(),
                )
            })?
            .to_string();
        // Non-positive counts are treated as not supplied
        let supplied_count = command.initial_chick_count.filter(|count| *count > 0);

        let _guard = self.write_lock.lock().await;
        let mut flocks = self.storage.load_flocks().await;
        let now = Utc::now();

        let existing_count = flock::find_flock(&flocks, flock_id).map(|f| f.initial_chick_count);
        // The count is only read when it will be stored
        let initial_chick_count = match existing_count {
            None => {
                let count = supplied_count.ok_or_else(|| {
                    RecordError::Validation(format!(
                        "initialChickCount must be a positive number when creating flock {}",
                        flock_id
                    ))
                })?;
                let count = chick_count(count)?;
                info!("Creating flock {} with {} chicks", flock_id, count);
                Some(count)
            }
            Some(0) => supplied_count.map(chick_count).transpose()?,
            Some(_) => None,
        };
        let is_new = existing_count.is_none();

        let flock = flock::ensure_flock(
            &mut flocks,
            flock_id,
            &breeder_name,
            initial_chick_count.unwrap_or(0),
            now.date_naive(),
        );
        if !is_new {
            flock.breeder_name = breeder_name.clone();
            if let Some(count) = initial_chick_count {
                info!("Backfilling initial chick count {} for flock {}", count, flock_id);
                flock.initial_chick_count = count;
            }
        }

        let observation = Observation {
            mortality: command.mortality,
            feed_kg: command.feed_kg,
            avg_weight: command.avg_weight,
            water_intake: command.water_intake,
            notes: command.notes,
        };
        let record = flock.upsert_daily_record(day, observation, now);

        self.storage
            .save_flocks(&flocks)
            .await
            .map_err(RecordError::Storage)?;

        info!("Saved day {} for flock {}", day, flock_id);
        Ok(RecordResult {
            record,
            success_message: format!(
                "Saved data for day {} for breeder {} successfully.",
                day, breeder_name
            ),
        })
    }

    /// Every stored flock, as stored
    pub async fn list_all(&self) -> Vec<Flock> {
        info!("Listing all flocks");
        let flocks = self.storage.load_flocks().await;
        info!("Found {} flocks", flocks.len());
        flocks
    }

    pub async fn get_flock(&self, flock_id: &str) -> RecordServiceResult<Flock> {
        info!("Getting flock: {}", flock_id);

        let flocks = self.storage.load_flocks().await;
        flock::find_flock(&flocks, flock_id).cloned().ok_or_else(|| {
            warn!("Flock not found: {}", flock_id);
            RecordError::NotFound(format!("Flock {} not found.", flock_id))
        })
    }

    /// Patch an existing daily record
    pub async fn update_record(&self, command: UpdateRecordCommand) -> RecordServiceResult<RecordResult> {
        info!(
            "Updating record: flock={:?}, day={:?}",
            command.flock_id, command.day
        );

        let flock_id = require_flock_id(command.flock_id.as_deref())?;
        let day = require_day(command.day)?;

        let _guard = self.write_lock.lock().await;
        let mut flocks = self.storage.load_flocks().await;

        let flock = find_existing_flock(&mut flocks, flock_id)?;
        if flock.find_record(day).is_none() {
            warn!("Day {} not found in flock {}", day, flock_id);
            return Err(RecordError::NotFound(format!(
                "No record found for day {} to update.",
                day
            )));
        }

        if let Some(name) = command.breeder_name.filter(|n| !n.trim().is_empty()) {
            flock.breeder_name = name;
        }

        let patch = Observation {
            mortality: command.mortality,
            feed_kg: command.feed_kg,
            avg_weight: command.avg_weight,
            water_intake: command.water_intake,
            notes: command.notes,
        };
        let record = flock
            .update_daily_record(day, patch, Utc::now())
            .ok_or_else(|| RecordError::NotFound(format!("No record found for day {}.", day)))?;

        self.storage
            .save_flocks(&flocks)
            .await
            .map_err(RecordError::Storage)?;

        info!("Updated day {} for flock {}", day, flock_id);
        Ok(RecordResult {
            record,
            success_message: format!("Updated record for day {} successfully.", day),
        })
    }

    pub async fn delete_record(&self, command: DeleteRecordCommand) -> RecordServiceResult<DeleteRecordResult> {
        info!(
            "Deleting record: flock={:?}, day={:?}",
            command.flock_id, command.day
        );

        let flock_id = require_flock_id(command.flock_id.as_deref())?;
        let day = require_day(command.day)?;

        let _guard = self.write_lock.lock().await;
        let mut flocks = self.storage.load_flocks().await;

        let flock = find_existing_flock(&mut flocks, flock_id)?;
        if !flock.delete_daily_record(day) {
            warn!("Day {} not found in flock {}", day, flock_id);
            return Err(RecordError::NotFound(format!("No record found for day {}.", day)));
        }
        let current_age = flock.current_age;

        self.storage
            .save_flocks(&flocks)
            .await
            .map_err(RecordError::Storage)?;

        info!(
            "Deleted day {} from flock {} (current age now {})",
            day, flock_id, current_age
        );
        Ok(DeleteRecordResult {
            success_message: format!(
                "Deleted record for day {} from flock {} successfully.",
                day, flock_id
            ),
        })
    }
}

fn require_flock_id(flock_id: Option<&str>) -> RecordServiceResult<&str> {
    flock_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RecordError::Validation("flockId is required".to_string()))
}

fn require_day(day: Option<u32>) -> RecordServiceResult<u32> {
    day.ok_or_else(|| RecordError::Validation("day is required".to_string()))
}

fn chick_count(count: i64) -> RecordServiceResult<u32> {
    u32::try_from(count)
        .map_err(|_| RecordError::Validation(format!("initialChickCount {} is too large", count)))
}

fn find_existing_flock<'a>(flocks: &'a mut [Flock], flock_id: &str) -> RecordServiceResult<&'a mut Flock> {
    flock::find_flock_mut(flocks, flock_id).ok_or_else(|| {
        warn!("Flock not found: {}", flock_id);
        RecordError::NotFound(format!("Flock {} not found.", flock_id))
    })
}
