//! Error types for the chemgrid-regrid crate.

use chemgrid_io::IoError;

/// Error type for all fallible operations in the chemgrid-regrid crate.
#[derive(Debug, thiserror::Error)]
pub enum RegridError {
    /// Returned when grid axes cannot be built from the given bounds.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when fewer than three usable source points remain.
    #[error("need at least 3 source points with finite coordinates, got {got}")]
    TooFewPoints {
        /// Number of usable points.
        got: usize,
    },

    /// Returned when a value slice does not match the number of source points.
    #[error("expected {expected} source values, got {got}")]
    LengthMismatch {
        /// Number of source columns.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Returned when a requested variable has no time dimension.
    #[error("variable '{name}' has dimensions ({dims}); expected (time, lev, ncol) or (time, ncol)")]
    UnsupportedVariable {
        /// Variable name.
        name: String,
        /// Its dimensions, comma separated.
        dims: String,
    },

    /// Wraps an error from the chemgrid-io crate.
    #[error(transparent)]
    Io(#[from] IoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_grid() {
        let err = RegridError::InvalidGrid {
            reason: "resolution must be finite and > 0, got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid grid: resolution must be finite and > 0, got 0"
        );
    }

    #[test]
    fn display_too_few_points() {
        let err = RegridError::TooFewPoints { got: 2 };
        assert_eq!(
            err.to_string(),
            "need at least 3 source points with finite coordinates, got 2"
        );
    }

    #[test]
    fn display_length_mismatch() {
        let err = RegridError::LengthMismatch {
            expected: 48602,
            got: 10,
        };
        assert_eq!(err.to_string(), "expected 48602 source values, got 10");
    }

    #[test]
    fn display_unsupported_variable() {
        let err = RegridError::UnsupportedVariable {
            name: "area".to_string(),
            dims: "ncol".to_string(),
        };
        assert!(err.to_string().starts_with("variable 'area' has dimensions (ncol)"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<RegridError>();
    }
}
