//! # chemgrid-calendar
//!
//! Timestamp handling for hourly emissions files.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["filename"] -->|"NeiFilename::parse()"| B["prefix + NaiveDateTime"]
//!     B -->|"shift_to_target_year()"| C["ShiftRecord"]
//!     C -->|"shift_back_to_reference_year()"| D["ShiftRecord"]
//!     C -->|".shifted()"| E["NeiFilename::render()"]
//!     F["start, end"] -->|"hourly_sequence()"| G["Vec of NaiveDateTime"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chemgrid_calendar::{FilenameFormat, shift_filename};
//!
//! let out = shift_filename("wrfchemi_d01_2017-08-01_01:00:00", 2020, &FilenameFormat::default())
//!     .unwrap();
//! assert_eq!(out.name, "wrfchemi_d01_2020-07-28_01:00:00");
//! assert!(out.record.weekday_matches());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `timestamp` | Fixed-width `YYYY-MM-DD_HH:MM:SS` parsing and formatting |
//! | `shift` | Weekday-preserving forward and inverse year shifts |
//! | `filename` | Prefix + timestamp filenames |
//! | `sequence` | Hourly sequences |
//! | `error` | Error types |

mod error;
mod filename;
mod sequence;
mod shift;
mod timestamp;

pub use error::CalendarError;
pub use filename::{
    DEFAULT_PREFIX, FilenameFormat, NeiFilename, ShiftedFilename, shift_filename,
    shift_filename_back,
};
pub use sequence::{floor_to_hour, hourly_sequence};
pub use shift::{ShiftDirection, ShiftRecord, shift_back_to_reference_year, shift_to_target_year};
pub use timestamp::{
    TIMESTAMP_LEN, TimestampStyle, format_timestamp, parse_timestamp, weekday_name,
};
