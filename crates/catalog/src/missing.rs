//! Detection of missing files in an hourly sequence.

use std::path::PathBuf;

use chemgrid_calendar::hourly_sequence;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::sequence::FileSequence;

/// Expected and missing files for one hourly range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingReport {
    expected: Vec<PathBuf>,
    missing: Vec<PathBuf>,
}

impl MissingReport {
    /// Every file the range should contain, in time order.
    pub fn expected(&self) -> &[PathBuf] {
        &self.expected
    }

    /// The subset of [`expected`](Self::expected) not present on disk.
    pub fn missing(&self) -> &[PathBuf] {
        &self.missing
    }

    /// Whether every expected file is present.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// List the hourly files between `start` and `end` (inclusive) and report
/// which of them do not exist.
///
/// Absence is reported, never raised: an unreadable or nonexistent directory
/// simply yields every file as missing.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyPrefix`] if the sequence is misconfigured.
pub fn find_missing(
    seq: &FileSequence,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<MissingReport, CatalogError> {
    seq.validate()?;

    let expected: Vec<PathBuf> = hourly_sequence(start, end)
        .into_iter()
        .map(|ts| seq.path(ts))
        .collect();
    let missing: Vec<PathBuf> = expected.iter().filter(|p| !p.is_file()).cloned().collect();

    if missing.is_empty() {
        info!(n_expected = expected.len(), dir = %seq.dir().display(), "no missing files found");
    } else {
        warn!(
            n_expected = expected.len(),
            n_missing = missing.len(),
            dir = %seq.dir().display(),
            "missing files"
        );
    }

    Ok(MissingReport { expected, missing })
}
