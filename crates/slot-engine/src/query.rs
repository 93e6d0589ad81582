//! Request/response shapes for the booking boundary.
//!
//! A query asks either for the available days starting at a date (`dates`) or
//! for the bookable times on one date (`times`). Requested durations are
//! checked against the configured granularity here; the calculator below this
//! layer never fails.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::SnapshotCache;
use crate::calendar::AvailabilityCalculator;
use crate::clock::DateRange;
use crate::config::EngineConfig;
use crate::error::{Result, SlotError};
use crate::model::{AvailableDate, AvailableTime, ServiceSnapshot};
use crate::source::SnapshotSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Days with availability from the query date through the calendar window.
    #[default]
    Dates,
    /// Bookable times on the query date only.
    Times,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub service_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub mode: QueryMode,
    /// Booking length overriding every station's configured duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_dates: Option<Vec<AvailableDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_times: Option<Vec<AvailableTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AvailabilityResponse {
    pub fn dates(dates: Vec<AvailableDate>) -> Self {
        Self {
            success: true,
            available_dates: Some(dates),
            available_times: None,
            error: None,
        }
    }

    pub fn times(times: Vec<AvailableTime>) -> Self {
        Self {
            success: true,
            available_dates: None,
            available_times: Some(times),
            error: None,
        }
    }

    pub fn failure(error: &SlotError) -> Self {
        Self {
            success: false,
            available_dates: None,
            available_times: None,
            error: Some(error.to_string()),
        }
    }
}

/// Reject booking lengths shorter than the configured granularity.
pub fn validate_duration(requested: u32, minimum: u32) -> Result<()> {
    if requested < minimum {
        return Err(SlotError::DurationBelowGranularity { requested, minimum });
    }
    Ok(())
}

/// Answer `query` against an already-loaded snapshot.
pub fn answer(
    query: &AvailabilityQuery,
    snapshot: &ServiceSnapshot,
    config: &EngineConfig,
) -> Result<AvailabilityResponse> {
    if query.service_id != snapshot.service_id {
        return Err(SlotError::UnknownService(query.service_id.clone()));
    }

    let overridden;
    let snapshot = match query.duration {
        Some(duration) => {
            validate_duration(duration, config.min_granularity_minutes)?;
            overridden = snapshot.with_duration(duration);
            &overridden
        }
        None => snapshot,
    };

    let calculator = AvailabilityCalculator::new(config.clock()?);
    let response = match query.mode {
        QueryMode::Dates => {
            let days_ahead = snapshot.days_ahead.unwrap_or(config.days_ahead);
            let range = DateRange::days_ahead(query.date, days_ahead)?;
            AvailabilityResponse::dates(calculator.compute(snapshot, range))
        }
        QueryMode::Times => AvailabilityResponse::times(calculator.day_times(snapshot, query.date)),
    };
    Ok(response)
}

/// Answer `query`, loading its snapshot through `cache` and `source`.
///
/// Load failures surface as errors; they are never turned into an empty result.
pub fn answer_cached<S: SnapshotSource>(
    query: &AvailabilityQuery,
    source: &S,
    cache: &mut SnapshotCache<String, ServiceSnapshot>,
    config: &EngineConfig,
) -> Result<AvailabilityResponse> {
    let hit = cache.contains(&query.service_id);
    let snapshot = cache
        .get_or_try_insert_with(query.service_id.clone(), || source.load(&query.service_id))
        .inspect_err(|e| warn!(service_id = %query.service_id, error = %e, "snapshot load failed"))?;
    debug!(service_id = %query.service_id, cache_hit = hit, "snapshot ready");
    answer(query, &snapshot, config)
}
