//! Resolve one station's free time for one day.
//!
//! Positive windows are unioned into the base hours first, then negative
//! constraints are removed, then appointments. Removals always win over
//! additions.

use crate::interval::{self, Interval};

/// Combine base hours, positive windows, negative windows and appointment blocks.
pub fn compute_free_intervals(
    base: &[Interval],
    positive: &[Interval],
    negative: &[Interval],
    appointments: &[Interval],
) -> Vec<Interval> {
    let working = interval::add_positive(base, positive);
    let working = interval::subtract_all(&working, negative);
    let working = interval::subtract_all(&working, appointments);
    interval::normalize(&working)
}

/// Everything known about one station on one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayInputs {
    pub base: Vec<Interval>,
    pub positive: Vec<Interval>,
    pub negative: Vec<Interval>,
    pub appointments: Vec<Interval>,
    /// Global business window. Positive windows cannot reach outside it.
    pub ceiling: Option<Vec<Interval>>,
}

impl DayInputs {
    pub fn new(base: Vec<Interval>) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn with_ceiling(mut self, ceiling: Vec<Interval>) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Free intervals after applying every input, bounded by the ceiling.
    pub fn resolve(&self) -> Vec<Interval> {
        let free = compute_free_intervals(
            &self.base,
            &self.positive,
            &self.negative,
            &self.appointments,
        );
        match &self.ceiling {
            Some(ceiling) => interval::intersect(&free, ceiling),
            None => free,
        }
    }
}
