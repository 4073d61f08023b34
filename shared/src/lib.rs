use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub mod lenient;

/// Calendar date format used for `Flock::start_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a timestamp the way it is stored and sent over the wire
/// (RFC 3339, UTC, millisecond precision, `Z` suffix).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A cohort of birds tracked as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flock {
    pub flock_id: String,
    #[serde(default)]
    pub breeder_name: String,
    /// Number of chicks placed when the flock was created (0 if never recorded)
    #[serde(default, deserialize_with = "lenient::count")]
    pub initial_chick_count: u32,
    /// Calendar date of creation (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Highest day with a recorded observation
    #[serde(default, deserialize_with = "lenient::count")]
    pub current_age: u32,
    #[serde(default)]
    pub daily_records: Vec<DailyRecord>,
}

/// One day's observations for a flock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(deserialize_with = "lenient::count")]
    pub day: u32,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub mortality: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub feed_kg: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub avg_weight: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_intake: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// RFC 3339 timestamp of the first save
    pub created_at: String,
    /// RFC 3339 timestamp of the latest save; older documents may lack it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of POST /api/records/save
///
/// Every field is optional at the wire level so that missing values surface
/// as validation errors from the record service instead of extractor errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecordRequest {
    pub flock_id: Option<String>,
    pub day: Option<u32>,
    pub breeder_name: Option<String>,
    /// Only consulted when the flock does not exist yet (or has no count)
    pub initial_chick_count: Option<i64>,
    pub mortality: Option<f64>,
    pub feed_kg: Option<f64>,
    pub avg_weight: Option<f64>,
    pub water_intake: Option<f64>,
    pub notes: Option<String>,
}

/// Body of PUT /api/records/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub flock_id: Option<String>,
    pub day: Option<u32>,
    /// Overwrites the flock's breeder name when present and non-empty
    pub breeder_name: Option<String>,
    pub mortality: Option<f64>,
    pub feed_kg: Option<f64>,
    pub avg_weight: Option<f64>,
    pub water_intake: Option<f64>,
    pub notes: Option<String>,
}

/// Body of DELETE /api/records/delete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRequest {
    pub flock_id: Option<String>,
    pub day: Option<u32>,
}

/// Response for save and update operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub message: String,
    pub record: DailyRecord,
}

/// Plain message body, used for delete confirmations and every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
