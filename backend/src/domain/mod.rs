//! # Domain Module
//!
//! Business rules for flock record keeping.
//!
//! ## Module Organization
//!
//! - **models**: `Flock`, `DailyRecord` and the in-memory operations on a
//!   loaded document (find, ensure, upsert, update, delete)
//! - **record_service**: validation and the load-mutate-save cycle behind
//!   every API operation
//! - **commands**: input and result types used by the record service
//!
//! ## Business Rules
//!
//! - A flock is created by the first save that names it, and only when a
//!   positive initial chick count is supplied
//! - A flock's initial chick count is never overwritten once set
//! - Each flock holds at most one record per day, kept sorted by day
//! - A flock's current age is the highest recorded day (0 when empty)
//! - A record's `created_at` never changes; `updated_at` moves on every write

pub mod commands;
pub mod models;
pub mod record_service;

pub use commands::*;
pub use record_service::{RecordError, RecordService, RecordServiceResult};
