//! Error types for the chemgrid-emissions crate.

use std::path::PathBuf;

use chemgrid_io::IoError;

/// Error type for all fallible operations in the chemgrid-emissions crate.
#[derive(Debug, thiserror::Error)]
pub enum EmissionsError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the region mask does not cover the file's columns.
    #[error("mask '{mask}' has {mask_len} columns but {} has {n_columns}", path.display())]
    MaskMismatch {
        /// Mask variable name.
        mask: String,
        /// Length of the mask.
        mask_len: usize,
        /// Length of the column dimension in the file.
        n_columns: usize,
        /// File being scaled.
        path: PathBuf,
    },

    /// Returned when the input directory cannot be listed.
    #[error("cannot list {}: {source}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Wraps an error from the chemgrid-io crate.
    #[error(transparent)]
    Io(#[from] IoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_config() {
        let err = EmissionsError::InvalidConfig {
            reason: "scale factor must be finite and >= 0, got -1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: scale factor must be finite and >= 0, got -1"
        );
    }

    #[test]
    fn display_mask_mismatch() {
        let err = EmissionsError::MaskMismatch {
            mask: "mask_Quebec".to_string(),
            mask_len: 10,
            n_columns: 12,
            path: PathBuf::from("out/qfed.emis_CO.nc"),
        };
        assert_eq!(
            err.to_string(),
            "mask 'mask_Quebec' has 10 columns but out/qfed.emis_CO.nc has 12"
        );
    }

    #[test]
    fn display_io_is_transparent() {
        let inner = IoError::FileNotFound {
            path: PathBuf::from("/x.nc"),
        };
        let msg = inner.to_string();
        let err: EmissionsError = inner.into();
        assert_eq!(err.to_string(), msg);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<EmissionsError>();
    }
}
