//! Fixed-width timestamp parsing and formatting.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Width of every supported timestamp string.
pub const TIMESTAMP_LEN: usize = 19;

/// Separator between the date and the time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStyle {
    /// `YYYY-MM-DD_HH:MM:SS`, used by WRF-Chem / NEI emissions files.
    #[default]
    Underscore,
    /// `YYYY-MM-DDTHH:MM:SS`, used by CAMS emissions files.
    IsoT,
}

impl TimestampStyle {
    /// The date/time separator character.
    pub fn separator(self) -> char {
        match self {
            Self::Underscore => '_',
            Self::IsoT => 'T',
        }
    }

    /// The human-readable pattern, for error messages.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Underscore => "YYYY-MM-DD_HH:MM:SS",
            Self::IsoT => "YYYY-MM-DDTHH:MM:SS",
        }
    }

    /// The chrono format string.
    pub fn format_str(self) -> &'static str {
        match self {
            Self::Underscore => "%Y-%m-%d_%H:%M:%S",
            Self::IsoT => "%Y-%m-%dT%H:%M:%S",
        }
    }

    /// The chrono format string with minutes and seconds pinned to zero.
    pub fn hourly_format_str(self) -> &'static str {
        match self {
            Self::Underscore => "%Y-%m-%d_%H:00:00",
            Self::IsoT => "%Y-%m-%dT%H:00:00",
        }
    }
}

impl fmt::Display for TimestampStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Parse a fixed-width timestamp.
///
/// chrono's `%Y` accepts signs and variable widths, so the shape is checked
/// byte by byte before handing the string to chrono for calendar validation.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidFormat`] if the string is not exactly
/// 19 characters in the given style or names a date that does not exist.
pub fn parse_timestamp(input: &str, style: TimestampStyle) -> Result<NaiveDateTime, CalendarError> {
    let invalid = |reason: String| CalendarError::InvalidFormat {
        input: input.to_string(),
        pattern: style.pattern(),
        reason,
    };

    let bytes = input.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return Err(invalid(format!(
            "expected {TIMESTAMP_LEN} characters, got {}",
            input.chars().count()
        )));
    }

    let sep = style.separator() as u8;
    for (i, &b) in bytes.iter().enumerate() {
        let expected = match i {
            4 | 7 => Some(b'-'),
            10 => Some(sep),
            13 | 16 => Some(b':'),
            _ => None,
        };
        match expected {
            Some(e) if b != e => {
                return Err(invalid(format!(
                    "expected '{}' at position {i}",
                    e as char
                )));
            }
            None if !b.is_ascii_digit() => {
                return Err(invalid(format!("expected a digit at position {i}")));
            }
            _ => {}
        }
    }

    NaiveDateTime::parse_from_str(input, style.format_str()).map_err(|e| invalid(e.to_string()))
}

/// Format a timestamp in the given fixed-width style.
pub fn format_timestamp(ts: NaiveDateTime, style: TimestampStyle) -> String {
    ts.format(style.format_str()).to_string()
}

/// Full English weekday name (`Tuesday`).
pub fn weekday_name(ts: NaiveDateTime) -> String {
    ts.format("%A").to_string()
}
