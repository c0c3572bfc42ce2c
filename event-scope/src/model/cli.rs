use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use time::UtcOffset;

use crate::model::{role::Role, taxonomy::Ruleset};

#[derive(Parser, Debug)]
#[command(
    name = "event-scope",
    about = "Live per-category event counts from a packet log",
    version,
    long_about = None
)]
pub struct Cli {
    /// Print a one-off count report instead of opening the live chart
    #[arg(long)]
    pub once: bool,

    /// Category set to count with (auto picks one from the log's file name)
    #[arg(long, value_enum, default_value_t = RulesetChoice::Auto)]
    pub ruleset: RulesetChoice,

    /// Log file to observe.
    #[arg(required = true)]
    pub logfile: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RulesetChoice {
    Auto,
    Default,
    Proxy,
    Combined,
}

impl RulesetChoice {
    pub fn resolve(self, role: Role) -> Ruleset {
        match self {
            RulesetChoice::Auto => role.default_ruleset(),
            RulesetChoice::Default => Ruleset::Default,
            RulesetChoice::Proxy => Ruleset::Proxy,
            RulesetChoice::Combined => Ruleset::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Once,
    Live,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub logfile: PathBuf,
    pub role: Role,
    pub ruleset: Ruleset,
    pub mode: RunMode,
    /// Offset used for displayed clock times, captured at startup.
    pub utc_offset: UtcOffset,
}

impl RunConfig {
    pub fn from_cli(cli: Cli, utc_offset: UtcOffset) -> Self {
        let role = Role::infer(&cli.logfile);

        Self {
            ruleset: cli.ruleset.resolve(role),
            role,
            mode: if cli.once { RunMode::Once } else { RunMode::Live },
            logfile: cli.logfile,
            utc_offset,
        }
    }
}
