//! Tests for per-station, per-day free time resolution.

use slot_engine::interval::Interval;
use slot_engine::resolver::{compute_free_intervals, DayInputs};

fn hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Interval {
    Interval::new(start_h * 60 + start_m, end_h * 60 + end_m)
}

#[test]
fn base_hours_only() {
    let free = compute_free_intervals(&[hm(9, 0, 17, 0)], &[], &[], &[]);
    assert_eq!(free, vec![hm(9, 0, 17, 0)]);
}

#[test]
fn positive_window_extends_base() {
    let free = compute_free_intervals(&[hm(9, 0, 17, 0)], &[hm(17, 0, 19, 0)], &[], &[]);
    assert_eq!(free, vec![hm(9, 0, 19, 0)]);
}

#[test]
fn negative_window_wins_over_positive() {
    // Extended evening hours, but the groomer is out 18:00-20:00.
    let free = compute_free_intervals(
        &[hm(9, 0, 17, 0)],
        &[hm(17, 0, 20, 0)],
        &[hm(18, 0, 20, 0)],
        &[],
    );
    assert_eq!(free, vec![hm(9, 0, 18, 0)]);
}

#[test]
fn appointments_removed_last() {
    let free = compute_free_intervals(
        &[hm(9, 0, 17, 0)],
        &[],
        &[hm(14, 0, 15, 0)],
        &[hm(10, 0, 11, 0)],
    );
    assert_eq!(
        free,
        vec![hm(9, 0, 10, 0), hm(11, 0, 14, 0), hm(15, 0, 17, 0)]
    );
}

#[test]
fn positive_window_on_closed_day_opens_it() {
    let free = compute_free_intervals(&[], &[hm(10, 0, 12, 0)], &[], &[]);
    assert_eq!(free, vec![hm(10, 0, 12, 0)]);
}

#[test]
fn fully_blocked_day_is_empty() {
    let free = compute_free_intervals(&[hm(9, 0, 17, 0)], &[], &[hm(0, 0, 24, 0)], &[]);
    assert!(free.is_empty());
}

#[test]
fn ceiling_clips_positive_window() {
    // Station positive window starts 07:00; the salon opens at 09:00.
    let mut inputs = DayInputs::new(vec![hm(9, 0, 17, 0)]).with_ceiling(vec![hm(9, 0, 17, 0)]);
    inputs.positive = vec![hm(7, 0, 10, 0)];
    assert_eq!(inputs.resolve(), vec![hm(9, 0, 17, 0)]);
}

#[test]
fn ceiling_keeps_positive_window_inside_business_hours() {
    // Station normally works 12:00-17:00; a positive window reopens 09:00-12:00.
    let mut inputs = DayInputs::new(vec![hm(12, 0, 17, 0)]).with_ceiling(vec![hm(8, 0, 18, 0)]);
    inputs.positive = vec![hm(9, 0, 12, 0)];
    assert_eq!(inputs.resolve(), vec![hm(9, 0, 17, 0)]);
}

#[test]
fn without_ceiling_matches_compute_free_intervals() {
    let mut inputs = DayInputs::new(vec![hm(9, 0, 17, 0)]);
    inputs.positive = vec![hm(7, 0, 9, 0)];
    inputs.appointments = vec![hm(12, 0, 13, 0)];
    assert_eq!(
        inputs.resolve(),
        compute_free_intervals(&inputs.base, &inputs.positive, &inputs.negative, &inputs.appointments)
    );
}
