//! Input snapshots and output records.
//!
//! Everything here is plain data with serde derives. Wire names are camelCase
//! to match the booking front end.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::WeeklyHours;
use crate::slots::StationSlotConfig;

/// An existing booking. Always removes availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub station_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Whether a constraint opens or closes time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Extra availability, e.g. extended hours.
    Positive,
    /// Blocked time, e.g. staff absence or maintenance.
    Negative,
}

/// A time-bound override on one station's availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: String,
    pub station_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub polarity: Polarity,
}

/// All data needed to compute availability for one service.
///
/// Supplied by the data-access layer, already loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSnapshot {
    pub service_id: String,
    /// Stations offering the service, in display order.
    pub stations: Vec<StationSlotConfig>,
    /// Salon-wide opening hours. Closed weekdays have no entry.
    pub business_hours: WeeklyHours,
    /// Station-specific hours; stations without an entry use `business_hours`.
    #[serde(default)]
    pub station_hours: BTreeMap<String, WeeklyHours>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Calendar window override for this service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_ahead: Option<u32>,
}

impl ServiceSnapshot {
    pub fn new(service_id: impl Into<String>, business_hours: WeeklyHours) -> Self {
        Self {
            service_id: service_id.into(),
            stations: Vec::new(),
            business_hours,
            station_hours: BTreeMap::new(),
            appointments: Vec::new(),
            constraints: Vec::new(),
            days_ahead: None,
        }
    }

    pub fn station(&self, station_id: &str) -> Option<&StationSlotConfig> {
        self.stations.iter().find(|s| s.station_id == station_id)
    }

    /// A copy with every station booked for `duration_minutes`.
    pub fn with_duration(&self, duration_minutes: u32) -> Self {
        let mut copy = self.clone();
        for station in &mut copy.stations {
            station.duration_minutes = duration_minutes;
        }
        copy
    }
}

/// One bookable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTime {
    /// `"HH:MM"`, 24-hour, zero-padded.
    pub time: String,
    pub available: bool,
    pub duration: u32,
    pub station_id: String,
    pub requires_staff_approval: bool,
}

/// One day's merged availability across all stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDate {
    pub date: NaiveDate,
    pub available: bool,
    /// Number of entries in `available_times`.
    pub slots: usize,
    /// First contributing station. Read `available_times[i].station_id` for
    /// the station of a given slot.
    pub station_id: String,
    pub available_times: Vec<AvailableTime>,
}
