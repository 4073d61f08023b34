//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so the record service can
//! run against the JSON document store or a test double.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::flock::Flock;

/// Whole-document storage for all flocks
///
/// There is no per-flock access: callers load everything, mutate in memory,
/// and write everything back.
#[async_trait]
pub trait FlockStorage: Send + Sync {
    /// Load every stored flock.
    ///
    /// A missing, empty or unreadable document yields an empty list; the
    /// problem is logged, never returned.
    async fn load_flocks(&self) -> Vec<Flock>;

    /// Replace the stored document with `flocks`
    async fn save_flocks(&self, flocks: &[Flock]) -> Result<()>;
}
