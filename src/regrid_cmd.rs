//! Regrid command: interpolate spectral-element output onto a lat/lon grid.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use chemgrid_regrid::regrid_file;

use crate::cli::RegridArgs;
use crate::config::ChemgridConfig;
use crate::convert;

/// Regrid each input file in turn.
pub fn run(args: RegridArgs, config: ChemgridConfig) -> Result<()> {
    let _cmd = info_span!("regrid").entered();
    let mut regrid = config.regrid;

    // CLI overrides config
    if !args.vars.is_empty() {
        regrid.variables = args.vars;
    }
    if let Some(preset) = args.preset {
        regrid.preset = preset.as_str().to_string();
        // An explicit preset wins over a custom grid from the config file.
        regrid.grid = None;
    }
    if let Some(level) = args.level {
        regrid.level_index = level;
    }
    if args.output_dir.is_some() {
        regrid.output_dir = args.output_dir;
    }

    let regrid_cfg = convert::build_regrid_config(&regrid)?;
    let output_dir = regrid.output_dir.unwrap_or_else(|| PathBuf::from("."));

    for input in &args.inputs {
        let out = regrid_file(input, &output_dir, &regrid_cfg)
            .with_context(|| format!("failed to regrid {}", input.display()))?;
        println!("save to: {}", out.display());
    }
    info!(n_files = args.inputs.len(), "regridding complete");
    Ok(())
}
