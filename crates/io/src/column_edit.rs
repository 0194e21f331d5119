//! In-place editing of column variables in a copy of a NetCDF file.

use std::path::{Path, PathBuf};

use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read;

/// Attribute value written alongside edited variables.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A text attribute.
    Text(String),
    /// A double-precision attribute.
    Number(f64),
}

impl From<&AttrValue> for AttributeValue {
    fn from(v: &AttrValue) -> Self {
        match v {
            AttrValue::Text(s) => AttributeValue::Str(s.clone()),
            AttrValue::Number(x) => AttributeValue::Double(*x),
        }
    }
}

/// Values of one variable together with where the column axis sits.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVariable {
    /// Variable name.
    pub name: String,
    /// Dimension lengths, outermost first.
    pub shape: Vec<usize>,
    /// Position of the column dimension within `shape`.
    pub column_axis: usize,
    /// Flattened row-major values, as stored.
    pub values: Vec<f64>,
    /// The variable's `_FillValue`, if it has one.
    pub fill_value: Option<f64>,
}

impl ColumnVariable {
    /// Column index of the flat element `flat_idx`.
    pub fn column_of(&self, flat_idx: usize) -> usize {
        let inner: usize = self.shape[self.column_axis + 1..].iter().product();
        (flat_idx / inner) % self.shape[self.column_axis]
    }

    /// Whether the flat element `flat_idx` holds the fill value.
    pub fn is_fill(&self, flat_idx: usize) -> bool {
        self.fill_value
            .is_some_and(|fv| !fv.is_nan() && self.values[flat_idx] == fv)
    }
}

/// A writable copy of a NetCDF file whose variables are edited in place.
pub struct ColumnEditor {
    path: PathBuf,
    file: netcdf::FileMut,
    column_dim: String,
}

impl ColumnEditor {
    /// Copies `src` to `dst` and opens the copy for editing.
    ///
    /// The parent directory of `dst` is created if needed. Attributes and
    /// variables not touched afterwards are preserved byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `src` is missing, [`IoError::Fs`]
    /// if the copy fails, and [`IoError::MissingDimension`] if the file has no
    /// `column_dim` dimension.
    pub fn copy_from(src: &Path, dst: &Path, column_dim: &str) -> Result<Self, IoError> {
        if !src.exists() {
            return Err(IoError::FileNotFound {
                path: src.to_path_buf(),
            });
        }
        if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| IoError::Fs {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::copy(src, dst).map_err(|source| IoError::Fs {
            path: dst.to_path_buf(),
            source,
        })?;

        let file = netcdf::append(dst)?;
        if file.dimension(column_dim).is_none() {
            return Err(IoError::MissingDimension {
                name: column_dim.to_string(),
                path: dst.to_path_buf(),
            });
        }
        debug!(src = %src.display(), dst = %dst.display(), "copied file for editing");
        Ok(Self {
            path: dst.to_path_buf(),
            file,
            column_dim: column_dim.to_string(),
        })
    }

    /// Path of the editable copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the column dimension.
    pub fn n_columns(&self) -> usize {
        self.file
            .dimension(&self.column_dim)
            .map_or(0, |d| d.len())
    }

    /// Names of all variables that carry the column dimension.
    pub fn column_variables(&self) -> Vec<String> {
        self.file
            .variables()
            .filter(|v| {
                v.dimensions()
                    .iter()
                    .any(|d| d.name() == self.column_dim)
            })
            .map(|v| v.name())
            .collect()
    }

    /// Reads all values of `name`.
    ///
    /// Values are returned as stored, fill values included, so they can be
    /// written back unchanged. Use [`ColumnVariable::is_fill`] to tell them
    /// apart.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if absent and
    /// [`IoError::UnsupportedLayout`] if it lacks the column dimension.
    pub fn read(&self, name: &str) -> Result<ColumnVariable, IoError> {
        let var = netcdf_read::variable(&self.file, name, &self.path)?;
        let dims = netcdf_read::dim_names(&var);
        let column_axis = dims
            .iter()
            .position(|d| *d == self.column_dim)
            .ok_or_else(|| IoError::UnsupportedLayout {
                name: name.to_string(),
                dims: dims.join(", "),
            })?;
        let shape = var.dimensions().iter().map(|d| d.len()).collect();
        let values = var.get_values::<f64, _>(..)?;
        let fill_value = netcdf_read::f64_attribute(&var, "_FillValue");
        Ok(ColumnVariable {
            name: name.to_string(),
            shape,
            column_axis,
            values,
            fill_value,
        })
    }

    /// Overwrites all values of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if absent and
    /// [`IoError::DimensionMismatch`] if `values` has the wrong length.
    pub fn write(&mut self, name: &str, values: &[f64]) -> Result<(), IoError> {
        let path = self.path.clone();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path,
            })?;
        let expected: usize = var.dimensions().iter().map(|d| d.len()).product();
        if values.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got: values.len(),
            });
        }
        var.put_values(values, ..)?;
        Ok(())
    }

    /// Adds or replaces attributes on `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if absent.
    pub fn annotate(&mut self, name: &str, attrs: &[(&str, AttrValue)]) -> Result<(), IoError> {
        let path = self.path.clone();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path,
            })?;
        for (key, value) in attrs {
            var.put_attribute(key, AttributeValue::from(value))?;
        }
        Ok(())
    }
}
