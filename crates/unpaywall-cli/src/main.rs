//! Unpaywall CLI
//!
//! Command-line front end for the redirect decision logic.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::error;

use args::Args;
use commands::Command;

fn main() -> Result<()> {
    let args = Args::parse();

    // A broken config file is reported by the command that loads it
    let settings = commands::config::load(args.config.as_deref().map(Path::new))
        .map(|config| config.logging)
        .unwrap_or_default();
    logging::init(&args, &settings)?;

    let result = run(args);

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let config = args.config;
    match args.command {
        Command::Check(check_args) => commands::check::execute(check_args, config),
        Command::Target(target_args) => commands::target::execute(target_args, config),
        Command::Whitelist(whitelist_args) => commands::whitelist::execute(whitelist_args, config),
        Command::Config(config_args) => commands::config::execute(config_args, config),
        Command::Completions(comp_args) => commands::completions::execute(comp_args),
    }
}
