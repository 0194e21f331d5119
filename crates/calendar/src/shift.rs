//! Weekday-preserving year shifts.
//!
//! Hourly emissions for one inventory year are reused for another year by
//! moving each timestamp to the target year and then nudging it by up to six
//! days so that it falls on the same weekday as the original. The nudge is
//! `delta_days mod 7` (floored, so always in `0..=6`), subtracted on the way
//! forward and added on the way back.
//!
//! Two edge cases are fixed by policy:
//!
//! - A February 29 shifted into a non-leap year first clamps to February 28.
//! - The nudge may carry the date across a year boundary (for example
//!   2017-01-01 shifted to 2020 lands on 2019-12-29). This is kept as is and
//!   flagged through [`ShiftRecord::crossed_year_boundary`].

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::error::CalendarError;
use crate::timestamp::{TimestampStyle, format_timestamp, weekday_name};

/// Which way a shift was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Reference year to target year.
    Forward,
    /// Target year back to reference year.
    Backward,
}

/// Outcome of a single weekday-preserving shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftRecord {
    direction: ShiftDirection,
    source: NaiveDateTime,
    year_shifted: NaiveDateTime,
    shifted: NaiveDateTime,
    requested_year: i32,
    year_offset: i32,
    remaining_days: u8,
}

impl ShiftRecord {
    /// Direction of the shift.
    pub fn direction(&self) -> ShiftDirection {
        self.direction
    }

    /// The input timestamp.
    pub fn source(&self) -> NaiveDateTime {
        self.source
    }

    /// The input moved by whole years, before weekday alignment.
    pub fn year_shifted(&self) -> NaiveDateTime {
        self.year_shifted
    }

    /// The final, weekday-aligned timestamp.
    pub fn shifted(&self) -> NaiveDateTime {
        self.shifted
    }

    /// The year that was asked for (target or reference).
    pub fn requested_year(&self) -> i32 {
        self.requested_year
    }

    /// Signed number of years applied before alignment.
    pub fn year_offset(&self) -> i32 {
        self.year_offset
    }

    /// Days moved during alignment, in `0..=6`.
    pub fn remaining_days(&self) -> u8 {
        self.remaining_days
    }

    /// Weekday of the input.
    pub fn source_weekday(&self) -> Weekday {
        self.source.weekday()
    }

    /// Weekday of the output.
    pub fn shifted_weekday(&self) -> Weekday {
        self.shifted.weekday()
    }

    /// Whether alignment preserved the weekday. Always true for records
    /// produced by this module.
    pub fn weekday_matches(&self) -> bool {
        self.source_weekday() == self.shifted_weekday()
    }

    /// Whether alignment moved the date out of the requested year.
    pub fn crossed_year_boundary(&self) -> bool {
        self.shifted.year() != self.requested_year
    }

    /// Output formatted in the given style.
    pub fn shifted_string(&self, style: TimestampStyle) -> String {
        format_timestamp(self.shifted, style)
    }
}

/// Move `ts` by `years` calendar years, clamping Feb 29 to Feb 28.
fn add_years(ts: NaiveDateTime, years: i32) -> Result<NaiveDateTime, CalendarError> {
    let out_of_range = || CalendarError::OutOfRange {
        timestamp: format_timestamp(ts, TimestampStyle::Underscore),
        years: i64::from(years),
    };
    let months = years
        .unsigned_abs()
        .checked_mul(12)
        .map(Months::new)
        .ok_or_else(out_of_range)?;
    let moved = if years >= 0 {
        ts.checked_add_months(months)
    } else {
        ts.checked_sub_months(months)
    };
    moved.ok_or_else(out_of_range)
}

/// `minuend - subtrahend` in years, or `OutOfRange` if it overflows.
fn year_difference(ts: NaiveDateTime, minuend: i32, subtrahend: i32) -> Result<i32, CalendarError> {
    minuend
        .checked_sub(subtrahend)
        .ok_or_else(|| CalendarError::OutOfRange {
            timestamp: format_timestamp(ts, TimestampStyle::Underscore),
            years: i64::from(minuend) - i64::from(subtrahend),
        })
}

fn offset_days(ts: NaiveDateTime, days: i64, years: i32) -> Result<NaiveDateTime, CalendarError> {
    ts.checked_add_signed(TimeDelta::days(days))
        .ok_or_else(|| CalendarError::OutOfRange {
            timestamp: format_timestamp(ts, TimestampStyle::Underscore),
            years: i64::from(years),
        })
}

fn log_record(record: &ShiftRecord) {
    let (from, to) = (weekday_name(record.source), weekday_name(record.shifted));
    debug!(
        source = %record.source,
        shifted = %record.shifted,
        remaining_days = record.remaining_days,
        "{from} matched with {to}"
    );
}

/// Shift `source` into `target_year`, keeping its weekday.
///
/// # Example
///
/// ```
/// use chemgrid_calendar::{TimestampStyle, parse_timestamp, shift_to_target_year};
///
/// let ts = parse_timestamp("2017-08-01_01:00:00", TimestampStyle::Underscore).unwrap();
/// let record = shift_to_target_year(ts, 2020).unwrap();
/// assert_eq!(record.shifted_string(TimestampStyle::Underscore), "2020-07-28_01:00:00");
/// assert!(record.weekday_matches());
/// ```
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result is not representable.
pub fn shift_to_target_year(
    source: NaiveDateTime,
    target_year: i32,
) -> Result<ShiftRecord, CalendarError> {
    let year_offset = year_difference(source, target_year, source.year())?;
    let year_shifted = add_years(source, year_offset)?;
    let delta_days = (year_shifted - source).num_days();
    let remaining_days = delta_days.rem_euclid(7);
    let shifted = offset_days(year_shifted, -remaining_days, year_offset)?;

    let record = ShiftRecord {
        direction: ShiftDirection::Forward,
        source,
        year_shifted,
        shifted,
        requested_year: target_year,
        year_offset,
        remaining_days: remaining_days as u8,
    };
    log_record(&record);
    Ok(record)
}

/// Map an already-shifted timestamp back toward `reference_year`, keeping
/// its weekday.
///
/// The alignment runs the other way from [`shift_to_target_year`]: the year
/// is subtracted and the remainder added, so composing the two preserves the
/// weekday. The calendar date may differ from the original by up to six days.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result is not representable.
pub fn shift_back_to_reference_year(
    adjusted: NaiveDateTime,
    reference_year: i32,
) -> Result<ShiftRecord, CalendarError> {
    let year_offset = year_difference(adjusted, adjusted.year(), reference_year)?;
    let year_shifted = add_years(adjusted, -year_offset)?;
    let delta_days = (adjusted - year_shifted).num_days();
    let remaining_days = delta_days.rem_euclid(7);
    let shifted = offset_days(year_shifted, remaining_days, year_offset)?;

    let record = ShiftRecord {
        direction: ShiftDirection::Backward,
        source: adjusted,
        year_shifted,
        shifted,
        requested_year: reference_year,
        year_offset,
        remaining_days: remaining_days as u8,
    };
    log_record(&record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn nei_2017_to_2020() {
        let r = shift_to_target_year(at(2017, 8, 1, 1), 2020).unwrap();
        assert_eq!(r.year_offset(), 3);
        assert_eq!(r.year_shifted(), at(2020, 8, 1, 1));
        // 365 + 365 + 366 = 1096 days, 1096 mod 7 = 4
        assert_eq!(r.remaining_days(), 4);
        assert_eq!(r.shifted(), at(2020, 7, 28, 1));
        assert_eq!(r.shifted_weekday(), Weekday::Tue);
        assert!(!r.crossed_year_boundary());
    }

    #[test]
    fn zero_offset_is_identity() {
        let ts = at(2017, 3, 14, 22);
        let r = shift_to_target_year(ts, 2017).unwrap();
        assert_eq!(r.shifted(), ts);
        assert_eq!(r.remaining_days(), 0);
        let again = shift_to_target_year(r.shifted(), 2017).unwrap();
        assert_eq!(again.shifted(), ts);
    }

    #[test]
    fn negative_offset_uses_floored_modulo() {
        // 2017-08-01 back to 2015: delta = -731, floored -731 mod 7 = 4
        let r = shift_to_target_year(at(2017, 8, 1, 0), 2015).unwrap();
        assert_eq!(r.year_offset(), -2);
        assert_eq!(r.remaining_days(), 4);
        assert_eq!(r.shifted(), at(2015, 7, 28, 0));
        assert!(r.weekday_matches());
    }

    #[test]
    fn early_january_crosses_into_previous_year() {
        // Sunday 2017-01-01 -> naive Wednesday 2020-01-01, trimmed 3 days.
        let r = shift_to_target_year(at(2017, 1, 1, 0), 2020).unwrap();
        assert_eq!(r.shifted(), at(2019, 12, 29, 0));
        assert_eq!(r.shifted_weekday(), Weekday::Sun);
        assert!(r.crossed_year_boundary());
    }

    #[test]
    fn leap_day_clamps_to_feb_28() {
        let r = shift_to_target_year(at(2020, 2, 29, 12), 2017).unwrap();
        assert_eq!(r.year_shifted(), at(2017, 2, 28, 12));
        assert_eq!(r.shifted_weekday(), Weekday::Sat);
        assert!(r.weekday_matches());
    }

    #[test]
    fn leap_day_into_leap_year_keeps_day() {
        let r = shift_to_target_year(at(2016, 2, 29, 0), 2020).unwrap();
        assert_eq!(r.year_shifted(), at(2020, 2, 29, 0));
        assert!(r.weekday_matches());
    }

    #[test]
    fn backward_recovers_original() {
        let fwd = shift_to_target_year(at(2017, 8, 1, 1), 2020).unwrap();
        let back = shift_back_to_reference_year(fwd.shifted(), 2017).unwrap();
        assert_eq!(back.direction(), ShiftDirection::Backward);
        assert_eq!(back.year_shifted(), at(2017, 7, 28, 1));
        assert_eq!(back.remaining_days(), 4);
        assert_eq!(back.shifted(), at(2017, 8, 1, 1));
    }

    #[test]
    fn backward_from_earlier_year() {
        let back = shift_back_to_reference_year(at(2012, 6, 5, 6), 2017).unwrap();
        assert_eq!(back.year_offset(), -5);
        assert!(back.weekday_matches());
        assert_eq!(back.source_weekday(), Weekday::Tue);
    }

    #[test]
    fn out_of_range_year() {
        let err = shift_to_target_year(at(2017, 1, 1, 0), 400_000).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange { .. }));
    }

    #[test]
    fn extreme_years_are_out_of_range() {
        let ts = at(2017, 8, 1, 1);
        for year in [i32::MIN, i32::MAX] {
            let err = shift_to_target_year(ts, year).unwrap_err();
            assert!(matches!(err, CalendarError::OutOfRange { .. }), "{year}");
            let err = shift_back_to_reference_year(ts, year).unwrap_err();
            assert!(matches!(err, CalendarError::OutOfRange { .. }), "{year}");
        }
    }

    #[test]
    fn weekday_preserved_across_many_years() {
        let mut day = at(2016, 1, 1, 5);
        let end = at(2017, 12, 31, 5);
        while day <= end {
            for target in 1990..=2060 {
                let r = shift_to_target_year(day, target).unwrap();
                assert!(r.weekday_matches(), "{day} -> {target}");
                assert!(r.remaining_days() <= 6);
                let back = shift_back_to_reference_year(r.shifted(), day.year()).unwrap();
                assert_eq!(back.shifted_weekday(), day.weekday(), "{day} <- {target}");
            }
            day += TimeDelta::days(3);
        }
    }
}
