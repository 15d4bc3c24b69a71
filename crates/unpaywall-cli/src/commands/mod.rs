//! CLI commands

pub mod check;
pub mod completions;
pub mod config;
pub mod target;
pub mod whitelist;

use clap::Subcommand;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a page snapshot the way the content script would
    Check(check::CheckArgs),

    /// Print the proxy target for a URL
    Target(target::TargetArgs),

    /// Whitelist inspection
    Whitelist(whitelist::WhitelistArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
