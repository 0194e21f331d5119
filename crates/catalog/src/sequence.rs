//! Naming scheme for a directory of hourly files.

use std::path::{Path, PathBuf};

use chemgrid_calendar::TimestampStyle;
use chrono::NaiveDateTime;

use crate::error::CatalogError;

/// Describes the hourly files expected in one directory.
///
/// A file for hour `t` is named `{prefix}_{t}{suffix}`, where `t` is
/// formatted in `style` with minutes and seconds pinned to `00:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSequence {
    dir: PathBuf,
    prefix: String,
    style: TimestampStyle,
    suffix: String,
}

impl FileSequence {
    /// Creates a sequence of `{prefix}_YYYY-MM-DD_HH:00:00` files in `dir`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            style: TimestampStyle::Underscore,
            suffix: String::new(),
        }
    }

    /// Sets the timestamp style.
    pub fn with_style(mut self, style: TimestampStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the text appended after the timestamp, e.g. `.nc`.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filename prefix, without the trailing `_`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Timestamp style.
    pub fn style(&self) -> TimestampStyle {
        self.style
    }

    /// Filename suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Validates this sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyPrefix`] if the prefix is empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.prefix.is_empty() {
            return Err(CatalogError::EmptyPrefix);
        }
        Ok(())
    }

    /// Expected filename for hour `ts`.
    pub fn file_name(&self, ts: NaiveDateTime) -> String {
        format!(
            "{}_{}{}",
            self.prefix,
            ts.format(self.style.hourly_format_str()),
            self.suffix
        )
    }

    /// Expected path for hour `ts`.
    pub fn path(&self, ts: NaiveDateTime) -> PathBuf {
        self.dir.join(self.file_name(ts))
    }
}
