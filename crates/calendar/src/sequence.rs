//! Hourly timestamp sequences.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

/// Truncates a timestamp to the start of its hour.
pub fn floor_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Generates every whole hour from `start` to `end`, inclusive.
///
/// `start` is first truncated to its hour, so `03:30` yields `03:00, 04:00,
/// ...`. An `end` earlier than the truncated start yields an empty sequence.
///
/// # Example
///
/// ```ignore
/// let dates = hourly_sequence(start, start + TimeDelta::hours(2));
/// assert_eq!(dates.len(), 3);
/// ```
pub fn hourly_sequence(start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
    let first = floor_to_hour(start);
    if end < first {
        return Vec::new();
    }
    let n_hours = (end - first).num_hours() as usize + 1;
    let mut hours = Vec::with_capacity(n_hours);
    let mut current = first;
    while current <= end {
        hours.push(current);
        current += TimeDelta::hours(1);
    }
    hours
}
