// backend/src/domain/commands.rs

//! Domain-level command and result types.
//! These structs are used by the record service and are **not** exposed over
//! the public API. The REST layer maps the DTOs from the `shared` crate to
//! these internal types.

pub mod records {
    use crate::domain::models::flock::DailyRecord;

    /// Input for saving (creating or replacing) a daily record.
    ///
    /// Presence is checked by the service, so required fields are still
    /// optional here.
    #[derive(Debug, Clone, Default)]
    pub struct SaveRecordCommand {
        pub flock_id: Option<String>,
        pub day: Option<u32>,
        pub breeder_name: Option<String>,
        pub initial_chick_count: Option<i64>,
        pub mortality: Option<f64>,
        pub feed_kg: Option<f64>,
        pub avg_weight: Option<f64>,
        pub water_intake: Option<f64>,
        pub notes: Option<String>,
    }

    /// Input for patching an existing daily record.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateRecordCommand {
        pub flock_id: Option<String>,
        pub day: Option<u32>,
        pub breeder_name: Option<String>,
        pub mortality: Option<f64>,
        pub feed_kg: Option<f64>,
        pub avg_weight: Option<f64>,
        pub water_intake: Option<f64>,
        pub notes: Option<String>,
    }

    /// Input for deleting a daily record.
    #[derive(Debug, Clone, Default)]
    pub struct DeleteRecordCommand {
        pub flock_id: Option<String>,
        pub day: Option<u32>,
    }

    /// Result of a save or update.
    #[derive(Debug, Clone)]
    pub struct RecordResult {
        pub record: DailyRecord,
        pub success_message: String,
    }

    /// Result of a delete.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordResult {
        pub success_message: String,
    }
}
