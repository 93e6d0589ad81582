//! Engine configuration.
//!
//! Loaded from a JSON document; every field has a default so `{}` is a valid
//! configuration. The business timezone can be overridden from the environment.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::BusinessClock;
use crate::error::Result;

/// Environment variable that overrides [`EngineConfig::timezone`].
pub const TIMEZONE_ENV: &str = "SLOTS_TIMEZONE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone of the salon, or `"UTC"` for raw UTC fields.
    pub timezone: String,
    /// How many days after the query date the calendar covers.
    pub days_ahead: u32,
    /// Shortest booking length a caller may request.
    pub min_granularity_minutes: u32,
    /// Entries kept by a [`crate::cache::SnapshotCache`] built from this config.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            days_ahead: 30,
            min_granularity_minutes: 15,
            cache_capacity: 64,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply [`TIMEZONE_ENV`] when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        match std::env::var(TIMEZONE_ENV) {
            Ok(tz) if !tz.trim().is_empty() => self.timezone = tz.trim().to_string(),
            Ok(_) => warn!("{} is set but empty, keeping '{}'", TIMEZONE_ENV, self.timezone),
            Err(_) => {}
        }
        self
    }

    /// The clock for the configured timezone.
    pub fn clock(&self) -> Result<BusinessClock> {
        BusinessClock::from_name(&self.timezone)
    }
}
