//! Business-timezone adapter: instants to local minutes, dates to weekday hours.
//!
//! [`BusinessClock`] is the one place where an absolute instant becomes a
//! business-local date and minute-of-day. The `Zoned` variant goes through
//! `chrono-tz`, so DST shifts and non-UTC salons bucket appointments into the
//! right local day. The `Utc` variant reads raw UTC fields.

use std::collections::BTreeMap;

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{normalize, Interval, MINUTES_PER_DAY};

// ── BusinessClock ───────────────────────────────────────────────────────────

/// How instants are mapped onto business-local days and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusinessClock {
    /// Raw UTC fields.
    #[default]
    Utc,
    /// Wall-clock time in a fixed IANA timezone.
    Zoned(Tz),
}

impl BusinessClock {
    /// Parse an IANA timezone name. `"UTC"` (any case) selects [`BusinessClock::Utc`].
    pub fn from_name(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("utc") {
            return Ok(Self::Utc);
        }
        name.parse::<Tz>()
            .map(Self::Zoned)
            .map_err(|_| SlotError::InvalidTimezone(format!("'{}'", name)))
    }

    /// The wall-clock datetime of `instant` in the business timezone.
    pub fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Utc => instant.naive_utc(),
            Self::Zoned(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// Minutes since business-local midnight. Seconds are truncated.
    pub fn minute_of_day(&self, instant: DateTime<Utc>) -> u32 {
        let time = self.local_datetime(instant).time();
        time.hour() * 60 + time.minute()
    }

    /// Minutes since business-local midnight, rounded up to the next whole
    /// minute when seconds remain. Can return 1440.
    pub fn minute_of_day_ceil(&self, instant: DateTime<Utc>) -> u32 {
        let time = self.local_datetime(instant).time();
        let partial = time.second() > 0 || time.nanosecond() > 0;
        self.minute_of_day(instant) + u32::from(partial)
    }

    /// Split `[start, end)` into one interval per local day it touches.
    ///
    /// Every minute the range touches is covered: the start rounds down and the
    /// end rounds up. Use this for blocks that take time away. Partial days are
    /// clipped to `[00:00, 24:00)`. An instant range that ends exactly at local
    /// midnight does not produce an empty trailing day. Only days inside
    /// `within` are returned.
    pub fn split_by_day(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        within: &DateRange,
    ) -> Vec<(NaiveDate, Interval)> {
        self.split(start, end, within, Rounding::Outward)
    }

    /// Like [`split_by_day`](Self::split_by_day), but only whole minutes
    /// inside the range are kept: the start rounds up and the end rounds down.
    /// Use this for windows that add time.
    pub fn split_by_day_inner(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        within: &DateRange,
    ) -> Vec<(NaiveDate, Interval)> {
        self.split(start, end, within, Rounding::Inward)
    }

    fn split(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        within: &DateRange,
        rounding: Rounding,
    ) -> Vec<(NaiveDate, Interval)> {
        if end <= start {
            return Vec::new();
        }

        let first_day = self.local_date(start);
        let last_day = self.local_date(end);
        let (start_minute, end_minute) = match rounding {
            Rounding::Outward => (self.minute_of_day(start), self.minute_of_day_ceil(end)),
            Rounding::Inward => (self.minute_of_day_ceil(start), self.minute_of_day(end)),
        };

        let from = first_day.max(within.start);
        let to = last_day.min(within.end);

        DateRange::new(from, to)
            .days()
            .filter_map(|day| {
                let lo = if day == first_day { start_minute } else { 0 };
                let hi = if day == last_day { end_minute } else { MINUTES_PER_DAY };
                let interval = Interval::new(lo, hi);
                (!interval.is_empty()).then_some((day, interval))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Rounding {
    Outward,
    Inward,
}

// ── Weekday keys ────────────────────────────────────────────────────────────

const WEEK_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Lower-case English weekday name used as the working-hours key.
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// Parse a weekday key. Accepts full and three-letter names in any case.
pub fn parse_weekday(key: &str) -> Result<Weekday> {
    match key.trim().to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sun),
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        _ => Err(SlotError::InvalidWeekday(format!("'{}'", key))),
    }
}

/// Parse `"HH:MM"` into minutes since midnight. `"24:00"` is accepted as end of day.
pub fn parse_clock_time(s: &str) -> Result<u32> {
    let invalid = || SlotError::InvalidTime(format!("'{}'", s));

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 24 || minutes >= 60 {
        return Err(invalid());
    }

    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

// ── WeeklyHours ─────────────────────────────────────────────────────────────

/// One opening window as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    pub start: String,
    pub end: String,
}

/// Opening windows per weekday, indexed from Sunday.
///
/// On the wire this is a map from weekday key to a list of `"HH:MM"` windows:
/// `{"monday": [{"start": "09:00", "end": "17:00"}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<HoursWindow>>",
    into = "BTreeMap<String, Vec<HoursWindow>>"
)]
pub struct WeeklyHours {
    days: [Vec<Interval>; 7],
}

impl WeeklyHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an opening window for `weekday`.
    pub fn with_window(mut self, weekday: Weekday, window: Interval) -> Self {
        let slot = &mut self.days[weekday.num_days_from_sunday() as usize];
        slot.push(window);
        let merged = normalize(slot);
        *slot = merged;
        self
    }

    /// Same window on every listed weekday.
    pub fn with_days(self, weekdays: &[Weekday], window: Interval) -> Self {
        weekdays
            .iter()
            .fold(self, |hours, &day| hours.with_window(day, window))
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &[Interval] {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Opening windows for the weekday of `date`.
    pub fn for_date(&self, date: NaiveDate) -> &[Interval] {
        self.for_weekday(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}

impl TryFrom<BTreeMap<String, Vec<HoursWindow>>> for WeeklyHours {
    type Error = SlotError;

    fn try_from(map: BTreeMap<String, Vec<HoursWindow>>) -> Result<Self> {
        let mut hours = WeeklyHours::new();
        for (key, windows) in map {
            let weekday = parse_weekday(&key)?;
            for window in windows {
                let start = parse_clock_time(&window.start)?;
                let end = parse_clock_time(&window.end)?;
                hours = hours.with_window(weekday, Interval::new(start, end));
            }
        }
        Ok(hours)
    }
}

impl From<WeeklyHours> for BTreeMap<String, Vec<HoursWindow>> {
    fn from(hours: WeeklyHours) -> Self {
        let mut map = BTreeMap::new();
        for (index, intervals) in hours.days.iter().enumerate() {
            if intervals.is_empty() {
                continue;
            }
            let weekday = WEEK_FROM_SUNDAY[index];
            let windows = intervals
                .iter()
                .map(|i| HoursWindow {
                    start: crate::slots::format_minute(i.start),
                    end: crate::slots::format_minute(i.end),
                })
                .collect();
            map.insert(weekday_key(weekday).to_string(), windows);
        }
        map
    }
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// An inclusive range of calendar days. A range whose end precedes its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Every day of `month` in `year`.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let invalid = || SlotError::InvalidDate(format!("{:04}-{:02}", year, month));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;
        Ok(Self::new(first, last))
    }

    /// `today` through `today + days_ahead`, both inclusive.
    pub fn days_ahead(today: NaiveDate, days_ahead: u32) -> Result<Self> {
        let end = today
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .ok_or_else(|| SlotError::InvalidDate(format!("{} + {} days", today, days_ahead)))?;
        Ok(Self::new(today, end))
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
