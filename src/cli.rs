use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// chemgrid: CAM-chem preprocessing on spectral-element grids.
#[derive(Parser)]
#[command(
    name = "chemgrid",
    version,
    about = "Emissions date shifting, regional scaling, missing-file checks and lat/lon regridding for CESM2.2 CAM-chem"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Shift timestamped filenames to another year, keeping the weekday.
    Shift(ShiftArgs),
    /// Link or copy reference-year files into place for a simulation period.
    Locate(LocateArgs),
    /// List hourly files missing from a directory.
    Missing(MissingArgs),
    /// Scale emissions inside a region mask.
    Scale(ScaleArgs),
    /// Regrid spectral-element output onto a regular lat/lon grid.
    Regrid(RegridArgs),
}

/// Arguments for the `shift` subcommand.
#[derive(clap::Args)]
pub struct ShiftArgs {
    /// Filenames to shift, e.g. `wrfchemi_d01_2017-08-01_01:00:00`.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Year to shift into.
    #[arg(long)]
    pub target_year: Option<i32>,

    /// Map already-shifted names back to the reference year.
    #[arg(long, requires = "reference_year")]
    pub reverse: bool,

    /// Reference (inventory) year for --reverse.
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Number of characters before the timestamp.
    #[arg(long)]
    pub prefix_len: Option<usize>,

    /// Prefix for the output names; defaults to the input prefix.
    #[arg(long)]
    pub output_prefix: Option<String>,

    /// Timestamps use `T` between date and time.
    #[arg(long)]
    pub iso: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `locate` subcommand.
#[derive(clap::Args)]
pub struct LocateArgs {
    /// First hour of the simulation period.
    #[arg(long)]
    pub start: String,

    /// Last hour of the simulation period (inclusive).
    #[arg(long)]
    pub end: String,

    /// Year of the inventory being reused.
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Directory holding the reference-year files.
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Directory to populate with target-year files.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Filename prefix, without the trailing `_`.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Prefix for the created files; defaults to --prefix.
    #[arg(long)]
    pub output_prefix: Option<String>,

    /// Copy files instead of symlinking.
    #[arg(long)]
    pub copy: bool,

    /// Replace existing target files.
    #[arg(long)]
    pub overwrite: bool,

    /// Print the plan without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Timestamps use `T` between date and time.
    #[arg(long)]
    pub iso: bool,

    /// Write the plan as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `missing` subcommand.
#[derive(clap::Args)]
pub struct MissingArgs {
    /// First expected hour.
    #[arg(long)]
    pub start: String,

    /// Last expected hour (inclusive).
    #[arg(long)]
    pub end: String,

    /// Directory to check.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Filename prefix, without the trailing `_`.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text after the timestamp, e.g. `.nc`.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Timestamps use `T` between date and time.
    #[arg(long)]
    pub iso: bool,

    /// Write the report as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `scale` subcommand.
#[derive(clap::Args)]
pub struct ScaleArgs {
    /// Species to scale, or `all`.
    #[arg(long)]
    pub species: Option<String>,

    /// Multiplier applied inside the region (0.7 = 70%).
    #[arg(long)]
    pub factor: Option<f64>,

    /// Mask variable name, e.g. `mask_Quebec`.
    #[arg(long)]
    pub mask: Option<String>,

    /// NetCDF file holding the region masks.
    #[arg(long)]
    pub mask_file: Option<PathBuf>,

    /// Directory of the original emissions files.
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory; defaults to a subdirectory of --input-dir.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the report as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Named target grids.
#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// 1 degree over CONUS.
    #[value(name = "conus-1deg")]
    Conus1Deg,
    /// 0.125 degree over CONUS.
    #[value(name = "conus-0125deg")]
    Conus0125Deg,
}

impl PresetArg {
    /// Name accepted by `[regrid].preset`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conus1Deg => "conus-1deg",
            Self::Conus0125Deg => "conus-0125deg",
        }
    }
}

/// Arguments for the `regrid` subcommand.
#[derive(clap::Args)]
pub struct RegridArgs {
    /// History files on the spectral-element grid.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Variables to regrid, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub vars: Vec<String>,

    /// Target grid.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Vertical level read from (time, lev, ncol) variables.
    #[arg(long)]
    pub level: Option<usize>,

    /// Directory for the regridded files.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
