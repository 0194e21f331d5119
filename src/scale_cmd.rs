//! Scale command: multiply emissions inside a region mask.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use chemgrid_emissions::scale_emissions;

use crate::cli::ScaleArgs;
use crate::config::ChemgridConfig;
use crate::convert;

/// Run regional scaling over the selected species.
pub fn run(args: ScaleArgs, config: ChemgridConfig) -> Result<()> {
    let _cmd = info_span!("scale").entered();
    let mut scale = config.scale;

    // CLI overrides config
    if let Some(species) = args.species {
        scale.species = species;
    }
    if args.factor.is_some() {
        scale.factor = args.factor;
    }
    if args.mask.is_some() {
        scale.mask_name = args.mask;
    }
    if args.mask_file.is_some() {
        scale.mask_file = args.mask_file;
    }
    if args.input_dir.is_some() {
        scale.input_dir = args.input_dir;
    }
    if args.output_dir.is_some() {
        scale.output_dir = args.output_dir;
    }

    let scale_cfg = convert::build_scale_config(&scale)?;
    let report = scale_emissions(&scale_cfg).context("regional scaling failed")?;

    for file in &report.scaled {
        println!("Saved scaled emissions: {}", file.path.display());
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if !report.is_success() {
        for failed in &report.failed {
            eprintln!("Error encountered for {}: {}", failed.species, failed.error);
        }
        bail!(
            "{} of {} species failed",
            report.failed.len(),
            report.failed.len() + report.scaled.len()
        );
    }
    Ok(())
}
