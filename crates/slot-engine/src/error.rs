//! Error types for slot-engine operations.
//!
//! The calculator itself is total over well-formed snapshots; these errors come
//! from parsing caller input and from the data-access seam.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A requested booking length is shorter than the configured granularity.
    #[error("Requested duration of {requested} minutes is below the minimum of {minimum} minutes")]
    DurationBelowGranularity { requested: u32, minimum: u32 },

    /// A snapshot or config document was not valid JSON for its schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// The data-access layer failed. Never conflated with "no slots found".
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
