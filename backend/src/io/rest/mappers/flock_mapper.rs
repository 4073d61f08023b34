//! backend/src/io/rest/mappers/flock_mapper.rs

use crate::domain::models::flock::{
    DailyRecord as DomainDailyRecord, Flock as DomainFlock, Observation,
};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use shared::{DailyRecord as SharedDailyRecord, Flock as SharedFlock, DATE_FORMAT};

/// Mapper to convert between shared Flock DTOs and domain Flock models.
pub struct FlockMapper;

impl FlockMapper {
    /// Converts a shared Flock DTO to a domain Flock model.
    pub fn to_domain(dto: SharedFlock) -> Result<DomainFlock> {
        let start_date = dto
            .start_date
            .as_deref()
            .map(|date| NaiveDate::parse_from_str(date, DATE_FORMAT))
            .transpose()
            .with_context(|| format!("Failed to parse startDate of flock {}", dto.flock_id))?;

        let daily_records = dto
            .daily_records
            .into_iter()
            .map(Self::record_to_domain)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Failed to map daily records of flock {}", dto.flock_id))?;

        Ok(DomainFlock {
            flock_id: dto.flock_id,
            breeder_name: dto.breeder_name,
            initial_chick_count: dto.initial_chick_count,
            start_date,
            current_age: dto.current_age,
            daily_records,
        })
    }

    /// Converts a domain Flock model to a shared Flock DTO.
    pub fn to_dto(domain: DomainFlock) -> SharedFlock {
        SharedFlock {
            flock_id: domain.flock_id,
            breeder_name: domain.breeder_name,
            initial_chick_count: domain.initial_chick_count,
            start_date: domain.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            current_age: domain.current_age,
            daily_records: domain
                .daily_records
                .into_iter()
                .map(Self::record_to_dto)
                .collect(),
        }
    }

    pub fn to_dto_list(flocks: Vec<DomainFlock>) -> Vec<SharedFlock> {
        flocks.into_iter().map(Self::to_dto).collect()
    }

    pub fn record_to_domain(dto: SharedDailyRecord) -> Result<DomainDailyRecord> {
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse createdAt of day {}", dto.day))?;
        // Records written before updatedAt existed count as never updated
        let updated_at = match dto.updated_at.as_deref() {
            Some(ts) => parse_timestamp(ts)
                .with_context(|| format!("Failed to parse updatedAt of day {}", dto.day))?,
            None => created_at,
        };

        Ok(DomainDailyRecord {
            day: dto.day,
            observation: Observation {
                mortality: dto.mortality,
                feed_kg: dto.feed_kg,
                avg_weight: dto.avg_weight,
                water_intake: dto.water_intake,
                notes: dto.notes,
            },
            created_at,
            updated_at,
        })
    }

    pub fn record_to_dto(domain: DomainDailyRecord) -> SharedDailyRecord {
        SharedDailyRecord {
            day: domain.day,
            mortality: domain.observation.mortality,
            feed_kg: domain.observation.feed_kg,
            avg_weight: domain.observation.avg_weight,
            water_intake: domain.observation.water_intake,
            notes: domain.observation.notes,
            created_at: shared::format_timestamp(domain.created_at),
            updated_at: Some(shared::format_timestamp(domain.updated_at)),
        }
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
