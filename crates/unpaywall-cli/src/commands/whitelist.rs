//! Whitelist inspection commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use unpaywall_core::whitelist::is_valid_domain;
use unpaywall_core::{PageUrl, Whitelist};

/// Whitelist command arguments
#[derive(Args, Debug)]
pub struct WhitelistArgs {
    #[command(subcommand)]
    pub command: WhitelistCommands,
}

/// Whitelist subcommands
#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    /// List the configured domains
    List,

    /// Check whether a host (or URL) is whitelisted
    Check {
        /// Hostname or absolute URL
        host: String,
    },

    /// Validate a domain entry before adding it
    Validate {
        /// Domain to validate
        domain: String,
    },
}

/// Execute whitelist command
pub fn execute(args: WhitelistArgs, config: Option<String>) -> Result<()> {
    match args.command {
        WhitelistCommands::List => list_domains(load_whitelist(config)?),
        WhitelistCommands::Check { host } => check_host(&load_whitelist(config)?, &host),
        WhitelistCommands::Validate { domain } => validate_domain(&domain),
    }
}

fn load_whitelist(config: Option<String>) -> Result<Whitelist> {
    let config = super::config::load(config.as_deref().map(Path::new))?;
    Ok(Whitelist::new(config.whitelist.domains))
}

fn list_domains(whitelist: Whitelist) -> Result<()> {
    println!("{}", "═".repeat(40).bright_blue());
    println!("{}", " Whitelisted domains".bright_white().bold());
    println!("{}", "═".repeat(40).bright_blue());

    if whitelist.is_empty() {
        println!("{}", "  (empty)".dimmed());
    } else {
        for domain in whitelist.domains() {
            println!("  {} {}", "●".green(), domain);
        }
    }

    println!("{}", "─".repeat(40).bright_black());
    println!("Total: {}", whitelist.len().to_string().green());

    Ok(())
}

fn check_host(whitelist: &Whitelist, input: &str) -> Result<()> {
    // Accept full URLs as well as bare hostnames
    let host = match PageUrl::parse(input) {
        Ok(page) if !page.host().is_empty() => page.host().to_string(),
        _ => input.to_string(),
    };

    if whitelist.is_whitelisted(&host) {
        println!("{} {} is whitelisted", "✓".green(), host.cyan());
    } else {
        println!("{} {} is not whitelisted", "✗".red(), host.cyan());
    }

    Ok(())
}

fn validate_domain(domain: &str) -> Result<()> {
    if !is_valid_domain(domain) {
        bail!("Invalid domain: {}", domain);
    }

    println!("{} {} is a valid domain", "✓".green(), domain.cyan());
    Ok(())
}
