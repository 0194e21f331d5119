//! Error types for the chemgrid-calendar crate.

/// Error type for all fallible operations in the chemgrid-calendar crate.
///
/// Every failure is a deterministic function of the input: a malformed
/// timestamp string, a filename too short to hold one, or a shift that
/// leaves the representable calendar range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a timestamp string does not match the fixed-width pattern.
    #[error("invalid timestamp '{input}' (expected {pattern}): {reason}")]
    InvalidFormat {
        /// The string that failed to parse.
        input: String,
        /// The expected pattern, e.g. `YYYY-MM-DD_HH:MM:SS`.
        pattern: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when a filename is too short to hold the prefix and a timestamp.
    #[error("filename '{name}' has no timestamp after a {prefix_len}-character prefix")]
    InvalidFilename {
        /// The filename that was provided.
        name: String,
        /// The fixed prefix length that was assumed.
        prefix_len: usize,
    },

    /// Returned when shifting by a number of years leaves the supported range.
    #[error("shifting {timestamp} by {years} year(s) is out of range")]
    OutOfRange {
        /// The timestamp being shifted, formatted.
        timestamp: String,
        /// The requested year offset.
        years: i64,
    },
}
