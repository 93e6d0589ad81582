//! Half-open minute intervals and the set operations built on them.
//!
//! An [`Interval`] is `[start, end)` in minutes since business-local midnight.
//! Every operation here is total: empty or inverted intervals are dropped, never
//! reported. Results are always sorted, disjoint and free of empty intervals.

use serde::{Deserialize, Serialize};

/// Minutes in a full day; the exclusive end of the last interval of a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open `[start, end)` range of minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The whole day, `[00:00, 24:00)`.
    pub fn full_day() -> Self {
        Self::new(0, MINUTES_PER_DAY)
    }

    /// Length in minutes; zero for empty or inverted intervals.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when the two intervals share at least one minute.
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Sort, drop empty intervals, and merge intervals that touch or overlap.
pub fn normalize(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.iter().copied().filter(|i| !i.is_empty()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }

    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Touching or overlapping: extend.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Intersection of two interval sets via a two-pointer sweep.
pub fn intersect(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let a = normalize(a);
    let b = normalize(b);

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start.max(b[j].start);
        let end = a[i].end.min(b[j].end);
        if end > start {
            out.push(Interval::new(start, end));
        }
        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

/// Remove a single block from every interval in `source`.
///
/// Each source interval yields zero, one or two remainders.
pub fn subtract(source: &[Interval], block: Interval) -> Vec<Interval> {
    let source = normalize(source);
    if block.is_empty() {
        return source;
    }

    let mut out = Vec::with_capacity(source.len() + 1);
    for interval in source {
        if !interval.overlaps(&block) {
            out.push(interval);
            continue;
        }
        if block.start > interval.start {
            out.push(Interval::new(interval.start, block.start.min(interval.end)));
        }
        if block.end < interval.end {
            out.push(Interval::new(block.end.max(interval.start), interval.end));
        }
    }

    normalize(&out)
}

/// Remove every block in `blocks` from `source`.
///
/// Stops as soon as nothing is left; the result is the same as applying every block.
pub fn subtract_all(source: &[Interval], blocks: &[Interval]) -> Vec<Interval> {
    let mut remaining = normalize(source);
    for block in normalize(blocks) {
        if remaining.is_empty() {
            break;
        }
        remaining = subtract(&remaining, block);
    }
    remaining
}

/// Union `additions` into `source`.
pub fn add_positive(source: &[Interval], additions: &[Interval]) -> Vec<Interval> {
    let mut all = Vec::with_capacity(source.len() + additions.len());
    all.extend_from_slice(source);
    all.extend_from_slice(additions);
    normalize(&all)
}

/// Intersect `intervals` with a single bounding interval.
pub fn clip(intervals: &[Interval], bounds: Interval) -> Vec<Interval> {
    intersect(intervals, &[bounds])
}

/// Total number of minutes covered, counting overlaps once.
pub fn total_minutes(intervals: &[Interval]) -> u32 {
    normalize(intervals).iter().map(Interval::len).sum()
}

