use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level chemgrid configuration (`chemgrid.toml`).
///
/// Every section is optional; command-line flags override the values here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChemgridConfig {
    /// Filename date shifting.
    #[serde(default)]
    pub shift: ShiftToml,

    /// Target-year file mapping onto a reference-year inventory.
    #[serde(default)]
    pub locate: LocateToml,

    /// Missing-file checks.
    #[serde(default)]
    pub missing: MissingToml,

    /// Regional emissions scaling.
    #[serde(default)]
    pub scale: ScaleToml,

    /// Lat/lon regridding.
    #[serde(default)]
    pub regrid: RegridToml,
}

/// Load `path`, or return the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<ChemgridConfig> {
    let Some(path) = path else {
        return Ok(ChemgridConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftToml {
    pub target_year: Option<i32>,
    pub reference_year: Option<i32>,
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,
    pub output_prefix: Option<String>,
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for ShiftToml {
    fn default() -> Self {
        Self {
            target_year: None,
            reference_year: None,
            prefix_len: default_prefix_len(),
            output_prefix: None,
            style: default_style(),
        }
    }
}

fn default_prefix_len() -> usize {
    chemgrid_calendar::DEFAULT_PREFIX.len()
}
fn default_style() -> String {
    "underscore".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocateToml {
    pub reference_year: Option<i32>,
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub prefix: String,
    pub output_prefix: Option<String>,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_link_mode")]
    pub mode: String,
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for LocateToml {
    fn default() -> Self {
        Self {
            reference_year: None,
            source_dir: None,
            output_dir: None,
            prefix: default_file_prefix(),
            output_prefix: None,
            suffix: String::new(),
            style: default_style(),
            mode: default_link_mode(),
            overwrite: false,
        }
    }
}

fn default_file_prefix() -> String {
    "wrfchemi_d01".to_string()
}
fn default_link_mode() -> String {
    "symlink".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissingToml {
    pub dir: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for MissingToml {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: default_file_prefix(),
            suffix: String::new(),
            style: default_style(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleToml {
    #[serde(default = "default_species")]
    pub species: String,
    pub factor: Option<f64>,
    pub mask_file: Option<PathBuf>,
    pub mask_name: Option<String>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_file_template")]
    pub file_template: String,
    #[serde(default = "default_grid_tag")]
    pub grid_tag: String,
    #[serde(default = "default_column_dim")]
    pub column_dim: String,
    #[serde(default = "default_skip_vars")]
    pub skip_vars: Vec<String>,
}

impl Default for ScaleToml {
    fn default() -> Self {
        Self {
            species: default_species(),
            factor: None,
            mask_file: None,
            mask_name: None,
            input_dir: None,
            output_dir: None,
            file_template: default_file_template(),
            grid_tag: default_grid_tag(),
            column_dim: default_column_dim(),
            skip_vars: default_skip_vars(),
        }
    }
}

fn default_species() -> String {
    "all".to_string()
}
fn default_file_template() -> String {
    chemgrid_emissions::DEFAULT_FILE_TEMPLATE.to_string()
}
fn default_grid_tag() -> String {
    chemgrid_emissions::DEFAULT_GRID_TAG.to_string()
}
fn default_column_dim() -> String {
    "ncol".to_string()
}
fn default_skip_vars() -> Vec<String> {
    chemgrid_emissions::DEFAULT_SKIP_VARS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegridToml {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default = "default_level_index")]
    pub level_index: usize,
    #[serde(default = "default_column_dim")]
    pub column_dim: String,
    pub output_dir: Option<PathBuf>,
    pub output_prefix: Option<String>,
    /// Custom target grid; replaces the preset's axes when set.
    #[serde(default)]
    pub grid: Option<GridToml>,
}

impl Default for RegridToml {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            variables: Vec::new(),
            level_index: default_level_index(),
            column_dim: default_column_dim(),
            output_dir: None,
            output_prefix: None,
            grid: None,
        }
    }
}

fn default_preset() -> String {
    "conus-1deg".to_string()
}
fn default_level_index() -> usize {
    chemgrid_regrid::DEFAULT_LEVEL_INDEX
}

/// Inclusive bounds of a custom lat/lon grid.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub lat_start: f64,
    pub lat_end: f64,
    pub lon_start: f64,
    pub lon_end: f64,
    pub resolution: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: ChemgridConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.shift.prefix_len, 13);
        assert_eq!(cfg.shift.style, "underscore");
        assert_eq!(cfg.locate.mode, "symlink");
        assert_eq!(cfg.missing.prefix, "wrfchemi_d01");
        assert_eq!(cfg.scale.species, "all");
        assert_eq!(cfg.scale.skip_vars.len(), 8);
        assert_eq!(cfg.regrid.level_index, 31);
        assert!(cfg.regrid.grid.is_none());
    }

    #[test]
    fn full_file_parses() {
        let cfg: ChemgridConfig = toml::from_str(
            r#"
            [shift]
            target_year = 2020
            output_prefix = "wrfchemi_d01_"

            [locate]
            reference_year = 2017
            source_dir = "/data/NEI2017"
            output_dir = "/data/NEI2020"
            mode = "copy"

            [missing]
            dir = "/data/CAMS"
            prefix = "CAMS-GLOB-ANT_v5.1_CO_MergedNEI2017WDKadjusted"
            suffix = ".nc"
            style = "iso_t"

            [scale]
            species = "CO"
            factor = 0.7
            mask_file = "/masks/mask_CanadaProvinces_ne0CONUS_ne30x8.nc"
            mask_name = "mask_Quebec"
            input_dir = "/data/qfed"

            [regrid]
            preset = "conus-0125deg"
            variables = ["O3", "CO", "OH"]

            [regrid.grid]
            lat_start = 20.0
            lat_end = 55.0
            lon_start = 230.0
            lon_end = 300.0
            resolution = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.shift.target_year, Some(2020));
        assert_eq!(cfg.locate.reference_year, Some(2017));
        assert_eq!(cfg.missing.style, "iso_t");
        assert_eq!(cfg.scale.factor, Some(0.7));
        assert_eq!(cfg.regrid.variables, vec!["O3", "CO", "OH"]);
        assert_eq!(cfg.regrid.grid.as_ref().map(|g| g.resolution), Some(0.5));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = toml::from_str::<ChemgridConfig>("[shift]\ntarget = 2020\n").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn non_integer_year_rejected() {
        assert!(toml::from_str::<ChemgridConfig>("[shift]\ntarget_year = 2020.5\n").is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        let cfg = load(None).unwrap();
        assert!(cfg.scale.factor.is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Some(Path::new("/no/such/chemgrid.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chemgrid.toml");
        std::fs::write(&path, "[shift]\ntarget_year = 2020\n\n[scale]\nfactor = 0.7\n").unwrap();
        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.shift.target_year, Some(2020));
        assert_eq!(cfg.scale.factor, Some(0.7));
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chemgrid.toml");
        std::fs::write(&path, "[shift]\ntarget_year = \"soon\"\n").unwrap();
        let err = load(Some(&path)).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to parse TOML config"));
        assert!(msg.contains("chemgrid.toml"));
    }
}
