//! Missing command: report hourly files absent from a directory.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use chemgrid_calendar::parse_timestamp;
use chemgrid_catalog::find_missing;

use crate::cli::MissingArgs;
use crate::config::ChemgridConfig;
use crate::convert;

/// Run the missing-file check.
pub fn run(args: MissingArgs, config: ChemgridConfig) -> Result<()> {
    let _cmd = info_span!("missing").entered();
    let mut missing = config.missing;

    // CLI overrides config
    if args.dir.is_some() {
        missing.dir = args.dir;
    }
    if let Some(prefix) = args.prefix {
        missing.prefix = prefix;
    }
    if let Some(suffix) = args.suffix {
        missing.suffix = suffix;
    }
    if args.iso {
        missing.style = "iso_t".to_string();
    }

    let seq = convert::build_missing_sequence(&missing)?;
    let start = parse_timestamp(&args.start, seq.style()).context("invalid --start")?;
    let end = parse_timestamp(&args.end, seq.style()).context("invalid --end")?;

    let report = find_missing(&seq, start, end)?;

    if report.is_complete() {
        println!("No missing files found.");
    } else {
        println!("Missing files:");
        for path in report.missing() {
            println!("{}", path.display());
        }
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
