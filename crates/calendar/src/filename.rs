//! Emissions filenames carrying an embedded timestamp after a fixed prefix.

use chrono::NaiveDateTime;

use crate::error::CalendarError;
use crate::shift::{ShiftRecord, shift_back_to_reference_year, shift_to_target_year};
use crate::timestamp::{TIMESTAMP_LEN, TimestampStyle, format_timestamp, parse_timestamp};

/// Prefix of hourly NEI files produced for WRF-Chem domain 1.
pub const DEFAULT_PREFIX: &str = "wrfchemi_d01_";

/// How to split and rebuild timestamped filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameFormat {
    /// Number of characters before the timestamp.
    prefix_len: usize,
    /// Prefix to write on output; `None` keeps the input prefix.
    output_prefix: Option<String>,
    /// Date/time separator style.
    style: TimestampStyle,
}

impl Default for FilenameFormat {
    fn default() -> Self {
        Self {
            prefix_len: DEFAULT_PREFIX.len(),
            output_prefix: None,
            style: TimestampStyle::Underscore,
        }
    }
}

impl FilenameFormat {
    /// Sets the number of characters before the timestamp.
    pub fn with_prefix_len(mut self, len: usize) -> Self {
        self.prefix_len = len;
        self
    }

    /// Replaces the prefix on output.
    pub fn with_output_prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.output_prefix = prefix.map(Into::into);
        self
    }

    /// Sets the timestamp style.
    pub fn with_style(mut self, style: TimestampStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the prefix length.
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Returns the output prefix override, if any.
    pub fn output_prefix(&self) -> Option<&str> {
        self.output_prefix.as_deref()
    }

    /// Returns the timestamp style.
    pub fn style(&self) -> TimestampStyle {
        self.style
    }
}

/// A filename split into its opaque prefix and parsed timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeiFilename {
    prefix: String,
    timestamp: NaiveDateTime,
}

impl NeiFilename {
    /// Builds a filename from its parts.
    pub fn new(prefix: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp,
        }
    }

    /// Splits `name` after `prefix_len` characters and parses the rest.
    ///
    /// The prefix is taken verbatim; only the timestamp is validated.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidFilename`] if `name` is too short or
    /// the split lands inside a multi-byte character, and
    /// [`CalendarError::InvalidFormat`] if the remainder is not a timestamp.
    pub fn parse(name: &str, prefix_len: usize, style: TimestampStyle) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidFilename {
            name: name.to_string(),
            prefix_len,
        };
        if name.len() < prefix_len + TIMESTAMP_LEN {
            return Err(invalid());
        }
        let prefix = name.get(..prefix_len).ok_or_else(invalid)?;
        let rest = name.get(prefix_len..).ok_or_else(invalid)?;
        let timestamp = parse_timestamp(rest, style)?;
        Ok(Self::new(prefix, timestamp))
    }

    /// The prefix, including any trailing separator.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The embedded timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Reassembles the filename in the given style.
    pub fn render(&self, style: TimestampStyle) -> String {
        format!("{}{}", self.prefix, format_timestamp(self.timestamp, style))
    }
}

/// Result of shifting a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftedFilename {
    /// The rebuilt filename.
    pub name: String,
    /// The underlying timestamp shift.
    pub record: ShiftRecord,
}

fn rebuild(parsed: &NeiFilename, record: ShiftRecord, format: &FilenameFormat) -> ShiftedFilename {
    let prefix = format.output_prefix().unwrap_or(parsed.prefix());
    let name = NeiFilename::new(prefix, record.shifted()).render(format.style());
    ShiftedFilename { name, record }
}

/// Shift the timestamp embedded in `name` to `target_year`.
///
/// # Errors
///
/// Propagates parse and range errors from [`NeiFilename::parse`] and
/// [`shift_to_target_year`].
pub fn shift_filename(
    name: &str,
    target_year: i32,
    format: &FilenameFormat,
) -> Result<ShiftedFilename, CalendarError> {
    let parsed = NeiFilename::parse(name, format.prefix_len(), format.style())?;
    let record = shift_to_target_year(parsed.timestamp(), target_year)?;
    Ok(rebuild(&parsed, record, format))
}

/// Map the timestamp embedded in `name` back to `reference_year`.
///
/// # Errors
///
/// Propagates parse and range errors from [`NeiFilename::parse`] and
/// [`shift_back_to_reference_year`].
pub fn shift_filename_back(
    name: &str,
    reference_year: i32,
    format: &FilenameFormat,
) -> Result<ShiftedFilename, CalendarError> {
    let parsed = NeiFilename::parse(name, format.prefix_len(), format.style())?;
    let record = shift_back_to_reference_year(parsed.timestamp(), reference_year)?;
    Ok(rebuild(&parsed, record, format))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Weekday};

    use super::*;

    #[test]
    fn default_prefix_is_thirteen_chars() {
        assert_eq!(FilenameFormat::default().prefix_len(), 13);
    }

    #[test]
    fn parse_splits_prefix() {
        let f = NeiFilename::parse(
            "wrfchemi_d01_2017-08-01_01:00:00",
            13,
            TimestampStyle::Underscore,
        )
        .unwrap();
        assert_eq!(f.prefix(), "wrfchemi_d01_");
        assert_eq!(f.timestamp().year(), 2017);
    }

    #[test]
    fn parse_ignores_prefix_content() {
        let f = NeiFilename::parse("XXXXXXXXXXXXX2017-08-01_01:00:00", 13, TimestampStyle::Underscore)
            .unwrap();
        assert_eq!(f.prefix(), "XXXXXXXXXXXXX");
    }

    #[test]
    fn parse_too_short() {
        let err = NeiFilename::parse("wrfchemi_d01_", 13, TimestampStyle::Underscore).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidFilename { .. }));
    }

    #[test]
    fn parse_wrong_prefix_length() {
        let err = NeiFilename::parse(
            "wrfchemi_d01_2017-08-01_01:00:00",
            12,
            TimestampStyle::Underscore,
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::InvalidFormat { .. }));
    }

    #[test]
    fn shift_nei_filename() {
        let out = shift_filename(
            "wrfchemi_d01_2017-08-01_01:00:00",
            2020,
            &FilenameFormat::default(),
        )
        .unwrap();
        assert_eq!(out.name, "wrfchemi_d01_2020-07-28_01:00:00");
        assert!(out.name.starts_with("wrfchemi_d01_2020-"));
        assert_eq!(out.record.shifted_weekday(), Weekday::Tue);
    }

    #[test]
    fn shift_with_output_prefix() {
        let format = FilenameFormat::default().with_output_prefix(Some("nei2017_for2020_"));
        let out = shift_filename("wrfchemi_d01_2017-08-01_01:00:00", 2020, &format).unwrap();
        assert_eq!(out.name, "nei2017_for2020_2020-07-28_01:00:00");
    }

    #[test]
    fn shift_back_filename() {
        let out = shift_filename_back(
            "wrfchemi_d01_2020-07-28_01:00:00",
            2017,
            &FilenameFormat::default(),
        )
        .unwrap();
        assert_eq!(out.name, "wrfchemi_d01_2017-08-01_01:00:00");
    }

    #[test]
    fn render_iso_style() {
        let f = NeiFilename::parse("CAMS_2018-07-01T03:00:00", 5, TimestampStyle::IsoT).unwrap();
        assert_eq!(f.render(TimestampStyle::IsoT), "CAMS_2018-07-01T03:00:00");
    }
}
