//! Shift command: move timestamped filenames to another year.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use chemgrid_calendar::{ShiftRecord, shift_filename, shift_filename_back, weekday_name};

use crate::cli::ShiftArgs;
use crate::config::ChemgridConfig;
use crate::convert;

/// One line of `--json` output.
#[derive(Serialize)]
struct ShiftedName<'a> {
    input: &'a str,
    output: String,
    source_weekday: String,
    shifted_weekday: String,
    crossed_year_boundary: bool,
    record: ShiftRecord,
}

/// Run the shift command.
pub fn run(args: ShiftArgs, config: ChemgridConfig) -> Result<()> {
    let _cmd = info_span!("shift").entered();
    let mut shift = config.shift;

    // CLI overrides config
    if args.target_year.is_some() {
        shift.target_year = args.target_year;
    }
    if args.reference_year.is_some() {
        shift.reference_year = args.reference_year;
    }
    if let Some(len) = args.prefix_len {
        shift.prefix_len = len;
    }
    if args.output_prefix.is_some() {
        shift.output_prefix = args.output_prefix;
    }
    if args.iso {
        shift.style = "iso_t".to_string();
    }

    let format = convert::build_filename_format(&shift)?;
    let year = if args.reverse {
        shift
            .reference_year
            .context("--reverse needs a reference year: use --reference-year")?
    } else {
        match shift.target_year {
            Some(y) => y,
            None => bail!("no target year: set [shift].target_year or use --target-year"),
        }
    };

    let mut results = Vec::with_capacity(args.files.len());
    for name in &args.files {
        let shifted = if args.reverse {
            shift_filename_back(name, year, &format)
        } else {
            shift_filename(name, year, &format)
        }
        .with_context(|| format!("failed to shift {name}"))?;

        if shifted.record.crossed_year_boundary() {
            warn!(input = %name, output = %shifted.name, year, "weekday alignment crossed a year boundary");
        }
        results.push(ShiftedName {
            input: name,
            source_weekday: weekday_name(shifted.record.source()),
            shifted_weekday: weekday_name(shifted.record.shifted()),
            crossed_year_boundary: shifted.record.crossed_year_boundary(),
            output: shifted.name,
            record: shifted.record,
        });
    }
    info!(n_files = results.len(), year, reverse = args.reverse, "shifted filenames");

    if args.json {
        let json = serde_json::to_string_pretty(&results).context("failed to serialize results")?;
        println!("{json}");
    } else {
        for r in &results {
            println!(
                "{} -> {}  ({} matched with {})",
                r.input, r.output, r.source_weekday, r.shifted_weekday
            );
        }
    }
    Ok(())
}
