//! Multi-station availability over a range of calendar days.
//!
//! Appointments and constraints are split into per-day intervals and bucketed
//! by `(date, station)` once per request. Each day then resolves every station
//! independently and merges the resulting slots into one [`AvailableDate`].
//! Days without a single slot are left out of the output.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::{debug, trace};

use crate::clock::{BusinessClock, DateRange};
use crate::interval::Interval;
use crate::model::{AvailableDate, AvailableTime, Polarity, ServiceSnapshot};
use crate::resolver::DayInputs;
use crate::slots::{format_minute, generate_slots, StationSlotConfig};

/// Per-day, per-station intervals taken from appointments and constraints.
#[derive(Debug, Default)]
struct DayBuckets {
    positive: Vec<Interval>,
    negative: Vec<Interval>,
    appointments: Vec<Interval>,
}

type BucketKey<'a> = (NaiveDate, &'a str);

/// Computes bookable slots for a service snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityCalculator {
    clock: BusinessClock,
}

impl AvailabilityCalculator {
    pub fn new(clock: BusinessClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> BusinessClock {
        self.clock
    }

    /// Available days in `range`, ascending by date.
    ///
    /// Only days with at least one slot on some station are returned.
    pub fn compute(&self, snapshot: &ServiceSnapshot, range: DateRange) -> Vec<AvailableDate> {
        debug!(
            service_id = %snapshot.service_id,
            start = %range.start,
            end = %range.end,
            stations = snapshot.stations.len(),
            "computing availability"
        );

        if range.is_empty() || snapshot.stations.is_empty() {
            return Vec::new();
        }

        let stations = distinct_stations(snapshot);
        let buckets = self.bucket(snapshot, &stations, &range);
        let days: Vec<AvailableDate> = range
            .days()
            .filter_map(|day| self.resolve_day(snapshot, &stations, &buckets, day))
            .collect();

        debug!(
            service_id = %snapshot.service_id,
            available_days = days.len(),
            "availability computed"
        );
        days
    }

    /// Every bookable slot on one day, sorted by time. Empty when closed.
    pub fn day_times(&self, snapshot: &ServiceSnapshot, day: NaiveDate) -> Vec<AvailableTime> {
        self.compute(snapshot, DateRange::single(day))
            .into_iter()
            .next()
            .map(|date| date.available_times)
            .unwrap_or_default()
    }

    /// Split appointments and constraints into `(date, station)` buckets.
    ///
    /// Entries for stations that do not offer the service are ignored. An
    /// appointment block is extended by the station's break time.
    fn bucket<'a>(
        &self,
        snapshot: &ServiceSnapshot,
        stations: &[&'a StationSlotConfig],
        range: &DateRange,
    ) -> HashMap<BucketKey<'a>, DayBuckets> {
        let stations: HashMap<&str, &'a StationSlotConfig> = stations
            .iter()
            .map(|&s| (s.station_id.as_str(), s))
            .collect();

        let mut buckets: HashMap<BucketKey<'a>, DayBuckets> = HashMap::new();

        for appointment in &snapshot.appointments {
            let Some(station) = stations.get(appointment.station_id.as_str()).copied() else {
                continue;
            };
            let end = appointment.end
                + Duration::minutes(i64::from(station.break_between_appointments));
            for (day, interval) in self.clock.split_by_day(appointment.start, end, range) {
                buckets
                    .entry((day, station.station_id.as_str()))
                    .or_default()
                    .appointments
                    .push(interval);
            }
        }

        for constraint in &snapshot.constraints {
            let Some(station) = stations.get(constraint.station_id.as_str()).copied() else {
                continue;
            };
            let (start, end) = (constraint.start, constraint.end);
            let parts = match constraint.polarity {
                Polarity::Positive => self.clock.split_by_day_inner(start, end, range),
                Polarity::Negative => self.clock.split_by_day(start, end, range),
            };
            for (day, interval) in parts {
                let bucket = buckets
                    .entry((day, station.station_id.as_str()))
                    .or_default();
                match constraint.polarity {
                    Polarity::Positive => bucket.positive.push(interval),
                    Polarity::Negative => bucket.negative.push(interval),
                }
            }
        }

        buckets
    }

    fn resolve_day(
        &self,
        snapshot: &ServiceSnapshot,
        stations: &[&StationSlotConfig],
        buckets: &HashMap<BucketKey<'_>, DayBuckets>,
        day: NaiveDate,
    ) -> Option<AvailableDate> {
        let business = snapshot.business_hours.for_date(day);
        if business.is_empty() {
            debug!(%day, "closed weekday, skipping");
            return None;
        }

        let mut times: Vec<AvailableTime> = Vec::new();
        for &station in stations {
            let base = snapshot
                .station_hours
                .get(&station.station_id)
                .map(|hours| hours.for_date(day))
                .unwrap_or(business);

            let mut inputs = DayInputs::new(base.to_vec()).with_ceiling(business.to_vec());
            if let Some(bucket) = buckets.get(&(day, station.station_id.as_str())) {
                inputs.positive = bucket.positive.clone();
                inputs.negative = bucket.negative.clone();
                inputs.appointments = bucket.appointments.clone();
            }

            let free = inputs.resolve();
            let slots = generate_slots(&free, station);
            trace!(
                %day,
                station_id = %station.station_id,
                free_intervals = free.len(),
                slots = slots.len(),
                "station resolved"
            );

            times.extend(slots.into_iter().map(|minute| AvailableTime {
                time: format_minute(minute),
                available: true,
                duration: station.duration_minutes,
                station_id: station.station_id.clone(),
                requires_staff_approval: station.requires_approval,
            }));
        }

        let first_station = times.first()?.station_id.clone();
        // Stable: equal times keep station order.
        times.sort_by(|a, b| a.time.cmp(&b.time));

        Some(AvailableDate {
            date: day,
            available: true,
            slots: times.len(),
            station_id: first_station,
            available_times: times,
        })
    }
}

/// Stations in snapshot order with repeated ids dropped. The first entry wins.
fn distinct_stations(snapshot: &ServiceSnapshot) -> Vec<&StationSlotConfig> {
    snapshot
        .stations
        .iter()
        .filter(|&station| {
            let first = snapshot
                .station(&station.station_id)
                .is_some_and(|first| std::ptr::eq(first, station));
            if !first {
                debug!(station_id = %station.station_id, "duplicate station entry ignored");
            }
            first
        })
        .collect()
}
