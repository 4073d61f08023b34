//! Flock and daily record models, plus the in-memory operations the record
//! service performs on a loaded document.
//!
//! Every mutating operation leaves the flock normalized: `daily_records`
//! sorted ascending by `day` and `current_age` equal to the highest day
//! (0 when there are no records).

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Flock {
    pub flock_id: String,
    pub breeder_name: String,
    /// 0 means the count was never recorded
    pub initial_chick_count: u32,
    pub start_date: Option<NaiveDate>,
    pub current_age: u32,
    pub daily_records: Vec<DailyRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub day: u32,
    pub observation: Observation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields of a daily record a caller is allowed to write.
///
/// Used as the full payload on save and as a sparse patch on update, where
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub mortality: Option<f64>,
    pub feed_kg: Option<f64>,
    pub avg_weight: Option<f64>,
    pub water_intake: Option<f64>,
    pub notes: Option<String>,
}

impl Observation {
    /// Overlay every field that is set in `patch`
    fn merge(&mut self, patch: Observation) {
        if patch.mortality.is_some() {
            self.mortality = patch.mortality;
        }
        if patch.feed_kg.is_some() {
            self.feed_kg = patch.feed_kg;
        }
        if patch.avg_weight.is_some() {
            self.avg_weight = patch.avg_weight;
        }
        if patch.water_intake.is_some() {
            self.water_intake = patch.water_intake;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }
}

impl Flock {
    pub fn new(
        flock_id: &str,
        breeder_name: &str,
        initial_chick_count: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            flock_id: flock_id.to_string(),
            breeder_name: breeder_name.to_string(),
            initial_chick_count,
            start_date: Some(start_date),
            current_age: 0,
            daily_records: Vec::new(),
        }
    }

    pub fn find_record(&self, day: u32) -> Option<&DailyRecord> {
        self.daily_records.iter().find(|r| r.day == day)
    }

    /// Insert or replace the record for `day`.
    ///
    /// A replaced record keeps its `created_at`; everything else comes from
    /// `observation`.
    pub fn upsert_daily_record(
        &mut self,
        day: u32,
        observation: Observation,
        now: DateTime<Utc>,
    ) -> DailyRecord {
        let saved = match self.daily_records.iter_mut().find(|r| r.day == day) {
            Some(existing) => {
                existing.observation = observation;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let record = DailyRecord {
                    day,
                    observation,
                    created_at: now,
                    updated_at: now,
                };
                self.daily_records.push(record.clone());
                record
            }
        };

        self.normalize();
        saved
    }

    /// Merge `patch` into the record for `day`. Returns `None` if there is no
    /// such record.
    pub fn update_daily_record(
        &mut self,
        day: u32,
        patch: Observation,
        now: DateTime<Utc>,
    ) -> Option<DailyRecord> {
        let existing = self.daily_records.iter_mut().find(|r| r.day == day)?;
        existing.observation.merge(patch);
        existing.updated_at = now;
        let updated = existing.clone();

        self.normalize();
        Some(updated)
    }

    /// Remove the record for `day`. Returns whether anything was removed.
    pub fn delete_daily_record(&mut self, day: u32) -> bool {
        let before = self.daily_records.len();
        self.daily_records.retain(|r| r.day != day);
        let removed = self.daily_records.len() != before;

        if removed {
            self.normalize();
        }
        removed
    }

    pub fn recompute_current_age(&mut self) {
        self.current_age = self.daily_records.iter().map(|r| r.day).max().unwrap_or(0);
    }

    fn normalize(&mut self) {
        self.daily_records.sort_by_key(|r| r.day);
        self.recompute_current_age();
    }
}

pub fn find_flock<'a>(flocks: &'a [Flock], flock_id: &str) -> Option<&'a Flock> {
    flocks.iter().find(|f| f.flock_id == flock_id)
}

pub fn find_flock_mut<'a>(flocks: &'a mut [Flock], flock_id: &str) -> Option<&'a mut Flock> {
    flocks.iter_mut().find(|f| f.flock_id == flock_id)
}

/// Return the flock with `flock_id`, appending a new empty one if absent.
///
/// Callers must reject creation without a positive `initial_chick_count`
/// before getting here; an existing flock is returned untouched.
pub fn ensure_flock<'a>(
    flocks: &'a mut Vec<Flock>,
    flock_id: &str,
    breeder_name: &str,
    initial_chick_count: u32,
    start_date: NaiveDate,
) -> &'a mut Flock {
    let index = match flocks.iter().position(|f| f.flock_id == flock_id) {
        Some(index) => index,
        None => {
            flocks.push(Flock::new(flock_id, breeder_name, initial_chick_count, start_date));
            flocks.len() - 1
        }
    };
    &mut flocks[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn mortality(value: f64) -> Observation {
        Observation {
            mortality: Some(value),
            ..Default::default()
        }
    }

    fn days(flock: &Flock) -> Vec<u32> {
        flock.daily_records.iter().map(|r| r.day).collect()
    }

    #[test]
    fn test_ensure_flock_creates_once() {
        let mut flocks = Vec::new();
        ensure_flock(&mut flocks, "F1", "Ali", 500, start());
        let flock = ensure_flock(&mut flocks, "F1", "Someone else", 900, start());

        assert_eq!(flock.breeder_name, "Ali");
        assert_eq!(flock.initial_chick_count, 500);
        assert_eq!(flocks.len(), 1);
        assert_eq!(flocks[0].current_age, 0);
        assert!(flocks[0].daily_records.is_empty());
    }

    #[test]
    fn test_find_flock() {
        let flocks = vec![
            Flock::new("F1", "Ali", 500, start()),
            Flock::new("F2", "Sara", 300, start()),
        ];
        assert_eq!(find_flock(&flocks, "F2").map(|f| f.breeder_name.as_str()), Some("Sara"));
        assert!(find_flock(&flocks, "F3").is_none());
    }

    #[test]
    fn test_upsert_keeps_created_at_and_bumps_updated_at() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        let first = flock.upsert_daily_record(3, mortality(2.0), t0());
        let later = t0() + Duration::minutes(5);
        let second = flock.upsert_daily_record(3, mortality(4.0), later);

        assert_eq!(flock.daily_records.len(), 1);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.updated_at, later);
        assert_eq!(second.observation.mortality, Some(4.0));
    }

    #[test]
    fn test_upsert_replaces_unsupplied_fields() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        flock.upsert_daily_record(
            1,
            Observation {
                mortality: Some(1.0),
                notes: Some("wet litter".to_string()),
                ..Default::default()
            },
            t0(),
        );
        let saved = flock.upsert_daily_record(1, mortality(3.0), t0());
        assert_eq!(saved.observation.notes, None);
    }

    #[test]
    fn test_upsert_sorts_and_tracks_current_age() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        flock.upsert_daily_record(5, mortality(1.0), t0());
        flock.upsert_daily_record(2, mortality(1.0), t0());
        flock.upsert_daily_record(9, mortality(1.0), t0());
        flock.upsert_daily_record(7, mortality(1.0), t0());

        assert_eq!(days(&flock), vec![2, 5, 7, 9]);
        assert_eq!(flock.current_age, 9);
    }

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        let created = flock.upsert_daily_record(
            1,
            Observation {
                mortality: Some(1.0),
                feed_kg: Some(20.5),
                ..Default::default()
            },
            t0(),
        );

        let later = t0() + Duration::hours(1);
        let updated = flock
            .update_daily_record(
                1,
                Observation {
                    avg_weight: Some(0.42),
                    ..Default::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(updated.day, 1);
        assert_eq!(updated.observation.mortality, Some(1.0));
        assert_eq!(updated.observation.feed_kg, Some(20.5));
        assert_eq!(updated.observation.avg_weight, Some(0.42));
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn test_update_missing_day_returns_none() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        flock.upsert_daily_record(1, mortality(1.0), t0());
        let before = flock.clone();

        assert!(flock.update_daily_record(2, mortality(3.0), t0()).is_none());
        assert_eq!(flock, before);
    }

    #[test]
    fn test_delete_max_day_recomputes_current_age_down() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        for day in [1, 2, 4] {
            flock.upsert_daily_record(day, mortality(0.0), t0());
        }

        assert!(flock.delete_daily_record(4));
        assert_eq!(flock.current_age, 2);
        assert_eq!(days(&flock), vec![1, 2]);
    }

    #[test]
    fn test_delete_non_max_day_keeps_current_age() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        for day in [1, 2, 4] {
            flock.upsert_daily_record(day, mortality(0.0), t0());
        }

        assert!(flock.delete_daily_record(2));
        assert_eq!(flock.current_age, 4);
        assert_eq!(days(&flock), vec![1, 4]);
    }

    #[test]
    fn test_delete_last_record_resets_current_age() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        flock.upsert_daily_record(3, mortality(0.0), t0());

        assert!(flock.delete_daily_record(3));
        assert_eq!(flock.current_age, 0);
        assert!(flock.daily_records.is_empty());
    }

    #[test]
    fn test_delete_missing_day() {
        let mut flock = Flock::new("F1", "Ali", 500, start());
        flock.upsert_daily_record(1, mortality(0.0), t0());

        assert!(!flock.delete_daily_record(8));
        assert_eq!(flock.daily_records.len(), 1);
    }

    #[test]
    fn test_mutation_normalizes_unsorted_loaded_records() {
        // Documents edited by hand may arrive out of order
        let record = |day| DailyRecord {
            day,
            observation: Observation::default(),
            created_at: t0(),
            updated_at: t0(),
        };
        let mut flock = Flock {
            daily_records: vec![record(6), record(2), record(4)],
            ..Flock::new("F1", "Ali", 500, start())
        };

        flock.update_daily_record(2, mortality(1.0), t0());
        assert_eq!(days(&flock), vec![2, 4, 6]);
        assert_eq!(flock.current_age, 6);
    }
}
