mod agg;
mod logging;
mod model;
mod source;
mod ui;

use std::process;

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use time::UtcOffset;
use tracing::debug;

use crate::{
    agg::reduce,
    model::cli::{Cli, RunConfig, RunMode},
    ui::report,
};

const USAGE: &str = "Usage: event-scope <logfile>";

fn main() -> Result<()> {
    // Must be read while the process is still single-threaded.
    let utc_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    logging::init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{USAGE}");
            process::exit(1);
        }
        Err(err) => err.exit(),
    };

    let config = RunConfig::from_cli(cli, utc_offset);
    debug!(
        logfile = %config.logfile.display(),
        role = %config.role,
        ruleset = config.ruleset.name(),
        "starting"
    );

    match config.mode {
        RunMode::Once => run_once(&config),
        RunMode::Live => ui::live::run_live_tui(&config),
    }
}

fn run_once(config: &RunConfig) -> Result<()> {
    let snapshot = reduce(&config.logfile, config.ruleset);
    report::print_report(config, &snapshot);
    Ok(())
}
