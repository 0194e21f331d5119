//! Locate command: populate a simulation period from reference-year files.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use chemgrid_calendar::parse_timestamp;
use chemgrid_catalog::{LinkMode, materialize, plan_remap};

use crate::cli::LocateArgs;
use crate::config::ChemgridConfig;
use crate::convert;

/// Run the locate command.
pub fn run(args: LocateArgs, config: ChemgridConfig) -> Result<()> {
    let _cmd = info_span!("locate").entered();
    let mut locate = config.locate;

    // CLI overrides config
    if args.reference_year.is_some() {
        locate.reference_year = args.reference_year;
    }
    if args.source_dir.is_some() {
        locate.source_dir = args.source_dir;
    }
    if args.output_dir.is_some() {
        locate.output_dir = args.output_dir;
    }
    if let Some(prefix) = args.prefix {
        locate.prefix = prefix;
    }
    if args.output_prefix.is_some() {
        locate.output_prefix = args.output_prefix;
    }
    if args.copy {
        locate.mode = "copy".to_string();
    }
    if args.overwrite {
        locate.overwrite = true;
    }
    if args.iso {
        locate.style = "iso_t".to_string();
    }

    let (remap, mode) = convert::build_remap_config(&locate)?;
    let style = remap.target().style();
    let start = parse_timestamp(&args.start, style).context("invalid --start")?;
    let end = parse_timestamp(&args.end, style).context("invalid --end")?;

    let plan = plan_remap(&remap, start, end)?;
    for entry in plan.missing_sources() {
        warn!(source = %entry.source.display(), "reference file not found");
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write plan: {}", path.display()))?;
        info!(path = %path.display(), "plan written");
    }

    if args.dry_run {
        for entry in plan.entries() {
            let marker = if entry.source_exists { "" } else { "  (missing)" };
            println!(
                "{} <- {}{marker}",
                entry.target.display(),
                entry.source.display()
            );
        }
        return Ok(());
    }

    let report = materialize(&plan, mode, locate.overwrite)?;
    let verb = match mode {
        LinkMode::Symlink => "linked",
        LinkMode::Copy => "copied",
    };
    println!(
        "{verb} {} file(s), {} already present, {} missing reference file(s)",
        report.created.len(),
        report.already_present.len(),
        report.missing_source.len()
    );
    Ok(())
}
