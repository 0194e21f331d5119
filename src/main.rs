mod cli;
mod config;
mod convert;
mod locate_cmd;
mod logging;
mod missing_cmd;
mod regrid_cmd;
mod scale_cmd;
mod shift_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Shift(args) => shift_cmd::run(args, config),
        Command::Locate(args) => locate_cmd::run(args, config),
        Command::Missing(args) => missing_cmd::run(args, config),
        Command::Scale(args) => scale_cmd::run(args, config),
        Command::Regrid(args) => regrid_cmd::run(args, config),
    }
}
