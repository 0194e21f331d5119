//! Error types for chemgrid-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the chemgrid-io crate.
///
/// This enum covers filesystem failures, errors raised by the NetCDF
/// library, and data-model mismatches found when reading unstructured
/// model output, region masks, or writing gridded files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps a filesystem error raised while copying or creating files.
    #[error("i/o error on {}: {source}", path.display())]
    Fs {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required dimension is not present in a file.
    #[error("dimension '{name}' not found in {}", path.display())]
    MissingDimension {
        /// Name of the missing dimension.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a variable's dimensions do not fit the expected layout.
    #[error("variable '{name}' has unsupported dimensions ({dims})")]
    UnsupportedLayout {
        /// Name of the variable.
        name: String,
        /// Comma-separated dimension names.
        dims: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_netcdf() {
        let err = IoError::Netcdf {
            reason: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "netcdf error: bad header");
    }

    #[test]
    fn display_fs() {
        let err = IoError::Fs {
            path: PathBuf::from("/out/a.nc"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "i/o error on /out/a.nc: denied");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "O3".to_string(),
            path: PathBuf::from("/data/h1.nc"),
        };
        assert_eq!(err.to_string(), "variable 'O3' not found in /data/h1.nc");
    }

    #[test]
    fn display_missing_dimension() {
        let err = IoError::MissingDimension {
            name: "ncol".to_string(),
            path: PathBuf::from("/data/h1.nc"),
        };
        assert_eq!(err.to_string(), "dimension 'ncol' not found in /data/h1.nc");
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "ncol".to_string(),
            expected: 48602,
            got: 174098,
        };
        assert_eq!(
            err.to_string(),
            "dimension 'ncol' mismatch: expected 48602, got 174098"
        );
    }

    #[test]
    fn display_unsupported_layout() {
        let err = IoError::UnsupportedLayout {
            name: "O3".to_string(),
            dims: "lat, lon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable 'O3' has unsupported dimensions (lat, lon)"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "level out of range; time out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): level out of range; time out of range"
        );
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
