//! Map parsed CLI matches onto command options and run them.

use std::process::ExitCode;

use anyhow::Result;
use clap::ArgMatches;

use crate::commands::{analyze, normalize, validate};

pub fn dispatch(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("analyze", sub)) => analyze::run(&analyze::Options::from_matches(sub)),
        Some(("normalize", sub)) => normalize::run(&normalize::Options::from_matches(sub)),
        Some(("validate", sub)) => validate::run(&validate::Options::from_matches(sub)),
        _ => anyhow::bail!("Unknown command. Run 'hwtidy --help' for usage."),
    }
}
