//! Multiplying emissions inside a region mask.

use std::path::{Path, PathBuf};

use chemgrid_io::{AttrValue, ColumnEditor, ColumnVariable, RegionMask, read_region_mask};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::{ScaleConfig, SpeciesSelection};
use crate::discover::discover_species;
use crate::error::EmissionsError;

/// One species file written successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledFile {
    /// Species name.
    pub species: String,
    /// Path of the scaled copy.
    pub path: PathBuf,
    /// Variables that were scaled.
    pub variables: Vec<String>,
}

/// One species that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSpecies {
    /// Species name.
    pub species: String,
    /// Rendered error.
    pub error: String,
}

/// Outcome of [`scale_emissions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleReport {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files written.
    pub scaled: Vec<ScaledFile>,
    /// Species that failed.
    pub failed: Vec<FailedSpecies>,
}

impl ScaleReport {
    /// Whether every selected species was scaled.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Multiply every element of `var` lying in a masked column by `factor`.
///
/// Elements outside the region and elements holding the variable's fill
/// value are left untouched. Returns the number of elements changed.
pub fn scale_in_mask(var: &mut ColumnVariable, mask: &RegionMask, factor: f64) -> usize {
    let mut n = 0;
    for i in 0..var.values.len() {
        if mask.contains(var.column_of(i)) && !var.is_fill(i) {
            var.values[i] *= factor;
            n += 1;
        }
    }
    n
}

/// Copy `src` to `dst` and scale its column variables inside `mask`.
///
/// Every variable carrying the column dimension and not listed in the
/// config's skip set is scaled and annotated with `region_scaling_applied`,
/// `region_mask_name` and `region_scale_factor`. Returns the names of the
/// scaled variables.
///
/// # Errors
///
/// Returns [`EmissionsError::MaskMismatch`] if the mask length differs from
/// the file's column count, or [`EmissionsError::Io`] on NetCDF failures.
pub fn scale_file(
    src: &Path,
    dst: &Path,
    mask: &RegionMask,
    config: &ScaleConfig,
) -> Result<Vec<String>, EmissionsError> {
    let mut editor = ColumnEditor::copy_from(src, dst, config.column_dim())?;
    if editor.n_columns() != mask.len() {
        return Err(EmissionsError::MaskMismatch {
            mask: mask.name().to_string(),
            mask_len: mask.len(),
            n_columns: editor.n_columns(),
            path: dst.to_path_buf(),
        });
    }

    let attrs = [
        ("region_scaling_applied", AttrValue::Text("True".to_string())),
        ("region_mask_name", AttrValue::Text(mask.name().to_string())),
        ("region_scale_factor", AttrValue::Number(config.factor())),
    ];

    let mut scaled = Vec::new();
    for name in editor.column_variables() {
        if config.skip_vars().contains(&name) {
            continue;
        }
        let mut var = editor.read(&name)?;
        let n = scale_in_mask(&mut var, mask, config.factor());
        editor.write(&name, &var.values)?;
        editor.annotate(&name, &attrs)?;
        debug!(variable = %name, n_scaled = n, "scaled variable");
        scaled.push(name);
    }
    Ok(scaled)
}

/// Scale every selected species file inside the configured region.
///
/// A failure on one species is logged and recorded in
/// [`ScaleReport::failed`]; the remaining species are still processed.
///
/// # Errors
///
/// Returns an error only if the configuration is invalid, the mask cannot
/// be read, or species discovery fails.
pub fn scale_emissions(config: &ScaleConfig) -> Result<ScaleReport, EmissionsError> {
    config.validate()?;

    let mask = read_region_mask(config.mask_file(), config.mask_name())?;
    let species = match config.species() {
        SpeciesSelection::Single(s) => vec![s.clone()],
        SpeciesSelection::All => discover_species(config.input_dir(), config.file_template())?,
    };
    if species.is_empty() {
        warn!(dir = %config.input_dir().display(), template = config.file_template(), "no species files found");
    }

    let output_dir = config.output_dir();
    info!(
        n_species = species.len(),
        factor = config.factor(),
        mask = config.mask_name(),
        output_dir = %output_dir.display(),
        "scaling emissions"
    );

    let mut report = ScaleReport {
        output_dir: output_dir.clone(),
        ..ScaleReport::default()
    };
    for spc in species {
        let _span = info_span!("species", name = %spc).entered();
        let file_name = config.file_name(&spc);
        let src = config.input_dir().join(&file_name);
        let dst = output_dir.join(&file_name);

        match scale_file(&src, &dst, &mask, config) {
            Ok(variables) => {
                info!(path = %dst.display(), n_variables = variables.len(), "saved scaled emissions");
                report.scaled.push(ScaledFile {
                    species: spc,
                    path: dst,
                    variables,
                });
            }
            Err(e) => {
                warn!(error = %e, "failed to scale species");
                report.failed.push(FailedSpecies {
                    species: spc,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}
