//! Error types for the chemgrid-catalog crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the chemgrid-catalog crate.
///
/// A missing expected file is never an error here; it is reported through
/// [`MissingReport`](crate::MissingReport) or skipped by
/// [`materialize`](crate::materialize).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Wraps an error from the chemgrid-calendar crate.
    #[error(transparent)]
    Calendar(#[from] chemgrid_calendar::CalendarError),

    /// Returned when a link or copy cannot be created.
    #[error("i/o error on {}: {source}", path.display())]
    Fs {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a file sequence is configured with an empty prefix.
    #[error("file prefix must not be empty")]
    EmptyPrefix,
}
