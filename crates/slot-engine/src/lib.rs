//! # slot-engine
//!
//! Deterministic booking-slot availability for multi-station salons.
//!
//! Given a service's stations, their durations, opening hours, existing
//! appointments and positive/negative constraints, the engine computes the
//! bookable start times for each day in a date range. Everything is pure and
//! synchronous; the engine performs no I/O.
//!
//! ## Modules
//!
//! - [`interval`]: Half-open minute intervals: normalize, intersect, subtract
//! - [`slots`]: Station slot configuration and slot start generation
//! - [`resolver`]: One station's free time on one day
//! - [`clock`]: Business timezone adapter, weekly hours, date ranges
//! - [`calendar`]: Multi-station availability across a date range
//! - [`model`]: Snapshots in, available dates and times out
//! - [`query`]: Dates/times queries and responses for the booking boundary
//! - [`source`]: Data-access seam supplying snapshots
//! - [`cache`]: Size-bounded LRU cache for loaded snapshots
//! - [`config`]: Engine configuration
//! - [`error`]: Error types

pub mod cache;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod interval;
pub mod model;
pub mod query;
pub mod resolver;
pub mod slots;
pub mod source;

pub use cache::SnapshotCache;
pub use calendar::AvailabilityCalculator;
pub use clock::{BusinessClock, DateRange, WeeklyHours};
pub use config::EngineConfig;
pub use error::SlotError;
pub use interval::{add_positive, intersect, normalize, subtract, subtract_all, Interval};
pub use model::{
    Appointment, AvailableDate, AvailableTime, Constraint, Polarity, ServiceSnapshot,
};
pub use query::{answer, answer_cached, AvailabilityQuery, AvailabilityResponse, QueryMode};
pub use resolver::{compute_free_intervals, DayInputs};
pub use slots::{generate_slots, StationSlotConfig};
pub use source::{InMemorySource, SnapshotSource};
