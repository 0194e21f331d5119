//! Regridding of spectral-element history files.

use std::path::{Path, PathBuf};

use chemgrid_io::{GriddedDataset, GriddedField, UnstructuredDataset, write_gridded};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::error::RegridError;
use crate::grid::{GridPreset, LatLonGrid};
use crate::interp::ScatteredLinear;

/// Surface layer of a 32-level, positive-down hybrid coordinate.
pub const DEFAULT_LEVEL_INDEX: usize = 31;

/// Global `description` written to regridded files.
pub const DEFAULT_DESCRIPTION: &str = "near surface estimated using linear interpolation";

/// What to regrid and onto which grid.
#[derive(Debug, Clone)]
pub struct RegridConfig {
    /// Variables to regrid.
    variables: Vec<String>,
    /// Target grid.
    grid: LatLonGrid,
    /// Prefix prepended to the input filename on output.
    output_prefix: String,
    /// Level read from `(time, lev, ncol)` variables.
    level_index: usize,
    /// Name of the column dimension.
    column_dim: String,
    /// Global `description` attribute.
    description: String,
}

impl RegridConfig {
    /// Creates a config for `variables` on a custom `grid`.
    pub fn new<I, S>(grid: LatLonGrid, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            grid,
            output_prefix: "Regrid_".to_string(),
            level_index: DEFAULT_LEVEL_INDEX,
            column_dim: "ncol".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }

    /// Creates a config for `variables` on a preset grid, with the preset's
    /// output prefix.
    pub fn from_preset<I, S>(preset: GridPreset, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(preset.grid(), variables).with_output_prefix(preset.output_prefix())
    }

    /// Sets the output filename prefix.
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Sets the vertical level read from 3-D variables.
    pub fn with_level_index(mut self, level: usize) -> Self {
        self.level_index = level;
        self
    }

    /// Sets the column dimension name.
    pub fn with_column_dim(mut self, dim: impl Into<String>) -> Self {
        self.column_dim = dim.into();
        self
    }

    /// Sets the global `description` attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Variables to regrid.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Target grid.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Output filename prefix.
    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    /// Vertical level index.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Column dimension name.
    pub fn column_dim(&self) -> &str {
        &self.column_dim
    }

    /// Global `description` attribute.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `{output_dir}/{prefix}{input file name}`.
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        output_dir.join(format!("{}{name}", self.output_prefix))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::InvalidConfig`] if no variables are requested,
    /// a variable name is empty or repeated, or the column dimension is empty.
    pub fn validate(&self) -> Result<(), RegridError> {
        if self.variables.is_empty() {
            return Err(RegridError::InvalidConfig {
                reason: "at least one variable is required".to_string(),
            });
        }
        for (i, v) in self.variables.iter().enumerate() {
            if v.is_empty() {
                return Err(RegridError::InvalidConfig {
                    reason: "variable names must not be empty".to_string(),
                });
            }
            if self.variables[..i].contains(v) {
                return Err(RegridError::InvalidConfig {
                    reason: format!("variable '{v}' requested twice"),
                });
            }
        }
        if self.column_dim.is_empty() {
            return Err(RegridError::InvalidConfig {
                reason: "column dimension must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Regrid the configured variables of the file at `path`.
///
/// Each variable is read one time step at a time, at
/// [`level_index`](RegridConfig::level_index) for `(time, lev, ncol)`
/// layouts. Time steps are interpolated in parallel against a single shared
/// triangulation.
///
/// # Errors
///
/// Returns [`RegridError::Io`] for unreadable files or variables,
/// [`RegridError::UnsupportedVariable`] for variables without a time
/// dimension, and [`RegridError::TooFewPoints`] for degenerate grids.
pub fn regrid_dataset(path: &Path, config: &RegridConfig) -> Result<GriddedDataset, RegridError> {
    config.validate()?;
    let _span = info_span!("regrid", path = %path.display()).entered();

    let source = UnstructuredDataset::open(path, config.column_dim())?;
    let (lons, lats) = source.coordinates()?;
    let interp = ScatteredLinear::new(&lons, &lats)?;
    let time = source.time_axis()?;
    let grid = config.grid();

    info!(
        n_columns = source.n_columns(),
        n_time = time.len(),
        n_lat = grid.lats().len(),
        n_lon = grid.lons().len(),
        n_vars = config.variables().len(),
        "regridding"
    );

    let mut out = GriddedDataset::new(time.clone(), grid.lats().to_vec(), grid.lons().to_vec())
        .with_description(config.description());

    for name in config.variables() {
        let info = source.variable_info(name)?;
        let level = match info.dims.len() {
            3 => Some(config.level_index()),
            2 => None,
            _ => {
                return Err(RegridError::UnsupportedVariable {
                    name: name.clone(),
                    dims: info.dims.join(", "),
                });
            }
        };

        let slices = (0..time.len())
            .map(|t| source.read_columns(name, t, level))
            .collect::<Result<Vec<_>, _>>()?;

        let regridded = slices
            .par_iter()
            .map(|values| interp.interpolate(values, grid))
            .collect::<Result<Vec<_>, _>>()?;

        let field = GriddedField::new(name.clone(), regridded.concat())
            .with_units(info.units)
            .with_long_name(info.long_name);
        out.insert(field)?;
        debug!(variable = %name, ?level, "regridded variable");
    }

    Ok(out)
}

/// Regrid `input` and write the result to
/// `{output_dir}/{prefix}{input file name}`. Returns the output path.
///
/// # Errors
///
/// Propagates errors from [`regrid_dataset`] and the NetCDF writer.
pub fn regrid_file(
    input: &Path,
    output_dir: &Path,
    config: &RegridConfig,
) -> Result<PathBuf, RegridError> {
    let dataset = regrid_dataset(input, config)?;
    let output = config.output_path(input, output_dir);
    write_gridded(&output, &dataset)?;
    info!(path = %output.display(), "saved regridded file");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_config() {
        let c = RegridConfig::from_preset(GridPreset::Conus0125Deg, ["O3", "CO"]);
        assert_eq!(c.output_prefix(), "CONUSRegrid0125_");
        assert_eq!(c.level_index(), 31);
        assert_eq!(c.column_dim(), "ncol");
        assert_eq!(c.grid().lats().len(), 561);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn output_path_prefixes_file_name() {
        let c = RegridConfig::from_preset(GridPreset::Conus1Deg, ["O3"]);
        let out = c.output_path(
            Path::new("/run/f.e22.FCnudged.ne30.cam.h1.2013-08.nc"),
            Path::new("/regrid"),
        );
        assert_eq!(
            out,
            PathBuf::from("/regrid/CONUSRegrid1_f.e22.FCnudged.ne30.cam.h1.2013-08.nc")
        );
    }

    #[test]
    fn empty_variables_invalid() {
        let c = RegridConfig::new(LatLonGrid::conus_1deg(), Vec::<String>::new());
        assert!(matches!(c.validate(), Err(RegridError::InvalidConfig { .. })));
    }

    #[test]
    fn duplicate_variable_invalid() {
        let c = RegridConfig::new(LatLonGrid::conus_1deg(), ["O3", "O3"]);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("'O3' requested twice"));
    }
}
