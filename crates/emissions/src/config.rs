//! Configuration for regional emissions scaling.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::EmissionsError;

/// Placeholder for the species name in filename templates.
pub const SPECIES_PLACEHOLDER: &str = "{species}";

/// QFED biomass-burning emissions on the ne0CONUSne30x8 grid.
pub const DEFAULT_FILE_TEMPLATE: &str = "qfed.emis_{species}_hires_mol_2020-2024_c20250115.nc";

/// Grid tag used in the default output directory name.
pub const DEFAULT_GRID_TAG: &str = "ne0conus30x8";

/// Column dimension of spectral-element files.
pub const DEFAULT_COLUMN_DIM: &str = "ncol";

/// Coordinate-like variables that are never scaled.
pub const DEFAULT_SKIP_VARS: [&str; 8] =
    ["time", "ncol", "lat", "lon", "area", "date", "altitude", "rrfac"];

/// Which species files to scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesSelection {
    /// One species, e.g. `CO`.
    Single(String),
    /// Every species whose file matches the template in the input directory.
    All,
}

impl SpeciesSelection {
    /// Parses `all` (any case) as [`All`](Self::All), anything else as a
    /// single species.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Single(s.to_string())
        }
    }
}

/// Settings for scaling emissions inside one region.
#[derive(Debug, Clone)]
pub struct ScaleConfig {
    /// Species to process.
    species: SpeciesSelection,
    /// Multiplier applied inside the region.
    factor: f64,
    /// File holding the region masks.
    mask_file: PathBuf,
    /// Mask variable, e.g. `mask_Quebec`.
    mask_name: String,
    /// Directory of the original emissions files.
    input_dir: PathBuf,
    /// Explicit output directory; `None` derives one under `input_dir`.
    output_dir: Option<PathBuf>,
    /// Filename template containing [`SPECIES_PLACEHOLDER`].
    file_template: String,
    /// Grid tag for the derived output directory.
    grid_tag: String,
    /// Name of the column dimension.
    column_dim: String,
    /// Variables never scaled.
    skip_vars: BTreeSet<String>,
}

impl ScaleConfig {
    /// Creates a configuration scaling every species by `factor` inside
    /// `mask_name`, with QFED defaults for everything else.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        mask_file: impl Into<PathBuf>,
        mask_name: impl Into<String>,
        factor: f64,
    ) -> Self {
        Self {
            species: SpeciesSelection::All,
            factor,
            mask_file: mask_file.into(),
            mask_name: mask_name.into(),
            input_dir: input_dir.into(),
            output_dir: None,
            file_template: DEFAULT_FILE_TEMPLATE.to_string(),
            grid_tag: DEFAULT_GRID_TAG.to_string(),
            column_dim: DEFAULT_COLUMN_DIM.to_string(),
            skip_vars: DEFAULT_SKIP_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sets the species selection.
    pub fn with_species(mut self, species: SpeciesSelection) -> Self {
        self.species = species;
        self
    }

    /// Sets an explicit output directory.
    pub fn with_output_dir(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.output_dir = dir.map(Into::into);
        self
    }

    /// Sets the filename template.
    pub fn with_file_template(mut self, template: impl Into<String>) -> Self {
        self.file_template = template.into();
        self
    }

    /// Sets the grid tag.
    pub fn with_grid_tag(mut self, tag: impl Into<String>) -> Self {
        self.grid_tag = tag.into();
        self
    }

    /// Sets the column dimension name.
    pub fn with_column_dim(mut self, dim: impl Into<String>) -> Self {
        self.column_dim = dim.into();
        self
    }

    /// Replaces the set of variables never scaled.
    pub fn with_skip_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_vars = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Species selection.
    pub fn species(&self) -> &SpeciesSelection {
        &self.species
    }

    /// Scale factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Mask file.
    pub fn mask_file(&self) -> &Path {
        &self.mask_file
    }

    /// Mask variable name.
    pub fn mask_name(&self) -> &str {
        &self.mask_name
    }

    /// Input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Filename template.
    pub fn file_template(&self) -> &str {
        &self.file_template
    }

    /// Grid tag.
    pub fn grid_tag(&self) -> &str {
        &self.grid_tag
    }

    /// Column dimension name.
    pub fn column_dim(&self) -> &str {
        &self.column_dim
    }

    /// Variables never scaled.
    pub fn skip_vars(&self) -> &BTreeSet<String> {
        &self.skip_vars
    }

    /// Scale factor as a rounded percentage, e.g. `0.7` gives `70`.
    pub fn percent(&self) -> i64 {
        (self.factor * 100.0).round() as i64
    }

    /// Output directory: the explicit one, or
    /// `{input_dir}/{grid_tag}_{mask_name}Masked_{pct}pct`.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self.input_dir.join(format!(
                "{}_{}Masked_{}pct",
                self.grid_tag,
                self.mask_name,
                self.percent()
            )),
        }
    }

    /// Filename for `species`.
    pub fn file_name(&self, species: &str) -> String {
        self.file_template.replace(SPECIES_PLACEHOLDER, species)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionsError::InvalidConfig`] for a negative or
    /// non-finite factor, an empty mask or column name, an empty species,
    /// or a template without exactly one `{species}` placeholder.
    pub fn validate(&self) -> Result<(), EmissionsError> {
        let invalid = |reason: String| Err(EmissionsError::InvalidConfig { reason });

        if !self.factor.is_finite() || self.factor < 0.0 {
            return invalid(format!(
                "scale factor must be finite and >= 0, got {}",
                self.factor
            ));
        }
        if self.mask_name.is_empty() {
            return invalid("mask name must not be empty".to_string());
        }
        if self.column_dim.is_empty() {
            return invalid("column dimension must not be empty".to_string());
        }
        if let SpeciesSelection::Single(s) = &self.species
            && s.is_empty()
        {
            return invalid("species must not be empty".to_string());
        }
        let n = self.file_template.matches(SPECIES_PLACEHOLDER).count();
        if n != 1 {
            return invalid(format!(
                "file template '{}' must contain {SPECIES_PLACEHOLDER} exactly once, found {n}",
                self.file_template
            ));
        }
        Ok(())
    }
}
