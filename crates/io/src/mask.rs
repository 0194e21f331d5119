//! Region masks defined per model column.

use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::netcdf_read;

/// A boolean mask over model columns, `true` inside the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    name: String,
    inside: Vec<bool>,
}

impl RegionMask {
    /// Creates a mask from per-column membership flags.
    pub fn new(name: impl Into<String>, inside: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            inside,
        }
    }

    /// Name of the mask variable the region came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-column membership flags.
    pub fn inside(&self) -> &[bool] {
        &self.inside
    }

    /// Number of columns covered by the mask.
    pub fn len(&self) -> usize {
        self.inside.len()
    }

    /// Whether the mask covers no columns at all.
    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }

    /// Number of columns inside the region.
    pub fn n_inside(&self) -> usize {
        self.inside.iter().filter(|&&b| b).count()
    }

    /// Whether column `idx` is inside the region. Out-of-range is outside.
    pub fn contains(&self, idx: usize) -> bool {
        self.inside.get(idx).copied().unwrap_or(false)
    }
}

/// Read the 1-D mask variable `name` from `path`.
///
/// Mask files on the ne0CONUSne30x8 grid store one variable per region on a
/// `grid_size` dimension; the dimension name is not checked, only that the
/// variable is one-dimensional. Any non-zero value is inside the region,
/// including NaN and fill values, the same as a numeric-to-boolean cast.
///
/// # Errors
///
/// Returns [`IoError::MissingVariable`] if the variable is absent and
/// [`IoError::UnsupportedLayout`] if it is not one-dimensional.
pub fn read_region_mask(path: &Path, name: &str) -> Result<RegionMask, IoError> {
    let file = netcdf_read::open_file(path)?;
    let var = netcdf_read::variable(&file, name, path)?;
    let dims = netcdf_read::dim_names(&var);
    if dims.len() != 1 {
        return Err(IoError::UnsupportedLayout {
            name: name.to_string(),
            dims: dims.join(", "),
        });
    }

    let values = var.get_values::<f64, _>(..)?;
    let inside: Vec<bool> = values.iter().map(|v| *v != 0.0).collect();

    let mask = RegionMask::new(name, inside);
    info!(
        mask = name,
        n_columns = mask.len(),
        n_inside = mask.n_inside(),
        "loaded region mask"
    );
    Ok(mask)
}
