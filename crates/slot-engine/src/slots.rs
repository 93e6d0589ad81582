//! Enumerate bookable start minutes inside free intervals.
//!
//! Slots are anchored to each free interval's own start: a window opening at
//! 09:30 yields a first slot at 09:30, not at the next round hour.

use serde::{Deserialize, Serialize};

use crate::interval::{normalize, Interval};

/// Step used when a station does not configure a slot increment.
pub const DEFAULT_SLOT_INCREMENT: u32 = 60;

fn default_increment() -> u32 {
    DEFAULT_SLOT_INCREMENT
}

/// Per-station booking configuration for the service being queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSlotConfig {
    pub station_id: String,
    /// Length of a booked appointment.
    pub duration_minutes: u32,
    /// Minutes kept free after each existing appointment.
    #[serde(default)]
    pub break_between_appointments: u32,
    /// Step between candidate start times. `0` steps by the duration.
    #[serde(default = "default_increment")]
    pub slot_increment_minutes: u32,
    #[serde(default)]
    pub requires_approval: bool,
}

impl StationSlotConfig {
    pub fn new(station_id: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            station_id: station_id.into(),
            duration_minutes,
            break_between_appointments: 0,
            slot_increment_minutes: DEFAULT_SLOT_INCREMENT,
            requires_approval: false,
        }
    }

    pub fn with_increment(mut self, minutes: u32) -> Self {
        self.slot_increment_minutes = minutes;
        self
    }

    pub fn with_break(mut self, minutes: u32) -> Self {
        self.break_between_appointments = minutes;
        self
    }

    pub fn with_approval(mut self, requires_approval: bool) -> Self {
        self.requires_approval = requires_approval;
        self
    }

    /// The effective step between slot starts.
    pub fn step(&self) -> u32 {
        if self.slot_increment_minutes == 0 {
            self.duration_minutes
        } else {
            self.slot_increment_minutes
        }
    }
}

/// Generate slot start minutes for every free interval.
///
/// A slot at `s` is valid when `[s, s + duration)` lies inside one free interval.
/// Intervals shorter than the duration contribute nothing. A zero duration
/// yields no slots at all.
pub fn generate_slots(intervals: &[Interval], config: &StationSlotConfig) -> Vec<u32> {
    let duration = config.duration_minutes;
    let step = config.step();
    if duration == 0 || step == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for interval in normalize(intervals) {
        let Some(last_start) = interval.end.checked_sub(duration) else {
            continue;
        };
        let mut next = Some(interval.start);
        while let Some(start) = next.filter(|&start| start <= last_start) {
            slots.push(start);
            next = start.checked_add(step);
        }
    }

    slots
}

/// Format a minute-of-day as zero-padded 24-hour `"HH:MM"`.
pub fn format_minute(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
