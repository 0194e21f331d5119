use chemgrid_calendar::{TimestampStyle, format_timestamp, hourly_sequence};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn full_leap_year_of_hours() {
    let hours = hourly_sequence(at(2020, 1, 1, 0), at(2020, 12, 31, 23));
    assert_eq!(hours.len(), 366 * 24);
    assert!(hours.iter().all(|h| h.minute() == 0 && h.second() == 0));
}

#[test]
fn formatted_names_are_contiguous() {
    let hours = hourly_sequence(at(2017, 7, 1, 22), at(2017, 7, 2, 1));
    let names: Vec<String> = hours
        .iter()
        .map(|h| format_timestamp(*h, TimestampStyle::Underscore))
        .collect();
    assert_eq!(
        names,
        vec![
            "2017-07-01_22:00:00",
            "2017-07-01_23:00:00",
            "2017-07-02_00:00:00",
            "2017-07-02_01:00:00",
        ]
    );
}

#[test]
fn length_always_matches_hour_span() {
    let start = at(2017, 1, 1, 0);
    for n in [0_i64, 1, 24, 100, 8760] {
        let end = start + chrono::TimeDelta::hours(n);
        assert_eq!(hourly_sequence(start, end).len(), n as usize + 1);
    }
}
