//! Read access to spectral-element output stored on a column dimension.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read;

/// Aliases tried for the column longitude coordinate.
const LON_ALIASES: &[&str] = &["lon", "longitude"];
/// Aliases tried for the column latitude coordinate.
const LAT_ALIASES: &[&str] = &["lat", "latitude"];

/// A time coordinate with its CF attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeAxis {
    values: Vec<f64>,
    units: Option<String>,
    calendar: Option<String>,
}

impl TimeAxis {
    /// Creates a time axis from raw offsets and optional CF attributes.
    pub fn new(values: Vec<f64>, units: Option<String>, calendar: Option<String>) -> Self {
        Self {
            values,
            units,
            calendar,
        }
    }

    /// Raw time offsets.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The `units` attribute, e.g. `days since 2013-08-01 00:00:00`.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// The `calendar` attribute, e.g. `noleap`.
    pub fn calendar(&self) -> Option<&str> {
        self.calendar.as_deref()
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis has no time steps.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Descriptive metadata for one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Variable name.
    pub name: String,
    /// Dimension names, outermost first.
    pub dims: Vec<String>,
    /// Dimension lengths, matching `dims`.
    pub shape: Vec<usize>,
    /// The `units` attribute, if present.
    pub units: Option<String>,
    /// The `long_name` attribute, if present.
    pub long_name: Option<String>,
}

/// An open unstructured-grid file whose horizontal dimension is a list of
/// columns (`ncol` in CAM-SE output).
pub struct UnstructuredDataset {
    path: PathBuf,
    file: netcdf::File,
    column_dim: String,
    n_columns: usize,
}

impl std::fmt::Debug for UnstructuredDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnstructuredDataset")
            .field("path", &self.path)
            .field("column_dim", &self.column_dim)
            .field("n_columns", &self.n_columns)
            .finish()
    }
}

impl UnstructuredDataset {
    /// Opens `path` and checks that it has a `column_dim` dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`], [`IoError::Netcdf`], or
    /// [`IoError::MissingDimension`].
    pub fn open(path: &Path, column_dim: &str) -> Result<Self, IoError> {
        let file = netcdf_read::open_file(path)?;
        let n_columns = file
            .dimension(column_dim)
            .ok_or_else(|| IoError::MissingDimension {
                name: column_dim.to_string(),
                path: path.to_path_buf(),
            })?
            .len();
        debug!(path = %path.display(), n_columns, "opened unstructured dataset");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            column_dim: column_dim.to_string(),
            n_columns,
        })
    }

    /// Path the dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the column dimension.
    pub fn column_dim(&self) -> &str {
        &self.column_dim
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Per-column longitudes and latitudes, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if either coordinate is absent and
    /// [`IoError::DimensionMismatch`] if its length differs from the column count.
    pub fn coordinates(&self) -> Result<(Vec<f64>, Vec<f64>), IoError> {
        let lons = netcdf_read::read_1d_f64(&self.file, LON_ALIASES, &self.path)?;
        let lats = netcdf_read::read_1d_f64(&self.file, LAT_ALIASES, &self.path)?;
        for (name, len) in [("lon", lons.len()), ("lat", lats.len())] {
            if len != self.n_columns {
                return Err(IoError::DimensionMismatch {
                    name: name.to_string(),
                    expected: self.n_columns,
                    got: len,
                });
            }
        }
        Ok((lons, lats))
    }

    /// The `time` coordinate with its `units` and `calendar` attributes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if the file has no `time` variable.
    pub fn time_axis(&self) -> Result<TimeAxis, IoError> {
        let var = netcdf_read::variable(&self.file, "time", &self.path)?;
        let values = var.get_values::<f64, _>(..)?;
        Ok(TimeAxis::new(
            values,
            netcdf_read::string_attribute(&var, "units"),
            netcdf_read::string_attribute(&var, "calendar"),
        ))
    }

    /// Metadata for variable `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if the variable is absent.
    pub fn variable_info(&self, name: &str) -> Result<VariableInfo, IoError> {
        let var = netcdf_read::variable(&self.file, name, &self.path)?;
        Ok(VariableInfo {
            name: name.to_string(),
            dims: netcdf_read::dim_names(&var),
            shape: var.dimensions().iter().map(|d| d.len()).collect(),
            units: netcdf_read::string_attribute(&var, "units"),
            long_name: netcdf_read::string_attribute(&var, "long_name"),
        })
    }

    /// Reads one horizontal slice of `name` as a vector of column values.
    ///
    /// Supported layouts are `(time, lev, ncol)`, `(time, ncol)` and `(ncol)`.
    /// `level` is required for the first and ignored otherwise. Values equal
    /// to the variable's `_FillValue` come back as NaN.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedLayout`] for other layouts and
    /// [`IoError::Validation`] when `time` or `level` is out of range.
    pub fn read_columns(
        &self,
        name: &str,
        time: usize,
        level: Option<usize>,
    ) -> Result<Vec<f64>, IoError> {
        let var = netcdf_read::variable(&self.file, name, &self.path)?;
        let dims = netcdf_read::dim_names(&var);
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

        if dims.last().map(String::as_str) != Some(self.column_dim.as_str()) {
            return Err(IoError::UnsupportedLayout {
                name: name.to_string(),
                dims: dims.join(", "),
            });
        }

        let check = |what: &str, idx: usize, len: usize| {
            if idx >= len {
                Err(IoError::Validation {
                    count: 1,
                    details: format!("{what} index {idx} out of range for '{name}' (len {len})"),
                })
            } else {
                Ok(())
            }
        };

        let mut values = match shape.len() {
            1 => var.get_values::<f64, _>(..)?,
            2 => {
                check("time", time, shape[0])?;
                var.get_values::<f64, _>((time, ..))?
            }
            3 => {
                let lev = level.ok_or_else(|| IoError::Validation {
                    count: 1,
                    details: format!("'{name}' has a vertical dimension; a level index is required"),
                })?;
                check("time", time, shape[0])?;
                check("level", lev, shape[1])?;
                var.get_values::<f64, _>((time, lev, ..))?
            }
            _ => {
                return Err(IoError::UnsupportedLayout {
                    name: name.to_string(),
                    dims: dims.join(", "),
                });
            }
        };

        netcdf_read::mask_fill(&mut values, netcdf_read::f64_attribute(&var, "_FillValue"));
        Ok(values)
    }
}
