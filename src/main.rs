use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

mod cli_bin;

use cli_bin::args::Cli;
use cli_bin::commands;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    Ok(commands::run(cli.command)?)
}
