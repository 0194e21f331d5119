use std::fs;

use chemgrid_calendar::TimestampStyle;
use chemgrid_catalog::{FileSequence, find_missing};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

fn at(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 7, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn reports_gaps_in_time_order() {
    let dir = TempDir::new().unwrap();
    let seq = FileSequence::new(dir.path(), "wrfchemi_d01");
    for h in [0, 1, 3, 5] {
        fs::write(seq.path(at(1, h)), b"").unwrap();
    }

    let report = find_missing(&seq, at(1, 0), at(1, 5)).unwrap();
    assert_eq!(report.expected().len(), 6);
    assert_eq!(
        report.missing(),
        &[seq.path(at(1, 2)), seq.path(at(1, 4))]
    );
    assert!(!report.is_complete());
}

#[test]
fn complete_directory() {
    let dir = TempDir::new().unwrap();
    let seq = FileSequence::new(dir.path(), "CAMS_CO")
        .with_style(TimestampStyle::IsoT)
        .with_suffix(".nc");
    for h in 0..24 {
        fs::write(seq.path(at(2, h)), b"").unwrap();
    }

    let report = find_missing(&seq, at(2, 0), at(2, 23)).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.expected().len(), 24);
}

#[test]
fn directories_do_not_count_as_files() {
    let dir = TempDir::new().unwrap();
    let seq = FileSequence::new(dir.path(), "wrfchemi_d01");
    fs::create_dir(seq.path(at(1, 0))).unwrap();

    let report = find_missing(&seq, at(1, 0), at(1, 0)).unwrap();
    assert_eq!(report.missing().len(), 1);
}

#[test]
fn spans_days() {
    let seq = FileSequence::new("/nonexistent", "p");
    let report = find_missing(&seq, at(1, 22), at(2, 1)).unwrap();
    let names: Vec<_> = report
        .expected()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "p_2018-07-01_22:00:00",
            "p_2018-07-01_23:00:00",
            "p_2018-07-02_00:00:00",
            "p_2018-07-02_01:00:00",
        ]
    );
}

#[test]
fn report_serializes_to_json() {
    let seq = FileSequence::new("/nonexistent", "p");
    let report = find_missing(&seq, at(1, 0), at(1, 1)).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["expected"].as_array().unwrap().len(), 2);
    assert_eq!(json["missing"].as_array().unwrap().len(), 2);
    assert_eq!(json["missing"][0], "/nonexistent/p_2018-07-01_00:00:00");
}
