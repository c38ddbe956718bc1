//! CLI command definitions using `clap`

pub mod handlers;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("hwtidy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize and validate lshw hardware-inventory JSON for search ingestion")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd_analyze())
        .subcommand(cmd_normalize())
        .subcommand(cmd_validate())
}

fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

fn paths_arg() -> Arg {
    Arg::new("paths")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .value_name("PATH")
        .help("lshw JSON files or directories containing them")
}

fn cmd_analyze() -> Command {
    Command::new("analyze")
        .about("Detect type inconsistencies across a corpus of inventory files")
        .arg(paths_arg())
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write the text report to FILE instead of stdout"),
        )
        .after_help(after_help_text(&[
            "hwtidy analyze dumps/                    Report on every .json directly in dumps/",
            "hwtidy analyze dumps/ -o report.txt      Write report.txt plus analysis_details.json",
        ]))
}

fn cmd_normalize() -> Command {
    Command::new("normalize")
        .about("Rewrite inventory files so known fields carry canonical types")
        .arg(paths_arg())
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Output directory for normalized files (default: overwrite input files)"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail on any normalization errors (default: log warnings and continue)"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .value_name("SUFFIX")
                .default_value("")
                .help("Suffix to add to output filenames when using an output directory"),
        )
        .arg(
            Arg::new("copy-originals")
                .long("copy-originals")
                .action(ArgAction::SetTrue)
                .help("Copy original files to the output directory first (removes the 'dci-extra.' filename prefix)"),
        )
        .after_help(after_help_text(&[
            "hwtidy normalize dumps/                  Normalize every .json under dumps/ in place",
            "hwtidy normalize dumps/ -o clean/        Write normalized copies into clean/",
            "hwtidy normalize dumps/ -o clean/ --suffix .norm --copy-originals",
        ]))
}

fn cmd_validate() -> Command {
    Command::new("validate")
        .about("Check inventory files against the expected-type table")
        .arg(paths_arg())
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write the detailed validation report (JSON) to FILE"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Treat warnings as errors"),
        )
        .after_help(after_help_text(&[
            "hwtidy validate dumps/                   Pass/fail line per file plus a summary",
            "hwtidy validate dumps/ -o report.json    Persist the full error/warning report",
        ]))
}
