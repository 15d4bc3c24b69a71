//! Target command - proxy URL construction

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;
use unpaywall_core::{PageUrl, ProxyTarget};

/// Target command arguments
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Page URL to rewrite
    pub url: String,
}

/// Execute target command
pub fn execute(args: TargetArgs, config: Option<String>) -> Result<()> {
    let config = super::config::load(config.as_deref().map(Path::new))?;
    config.validate().context("Configuration validation failed")?;
    let proxy = ProxyTarget::new(config.redirect.proxy_origin, config.redirect.flag_param);

    let page = PageUrl::parse(&args.url).with_context(|| format!("Invalid URL: {}", args.url))?;

    if page.is_redirected(proxy.flag()) {
        eprintln!(
            "{} {} already carries the {} flag; the content script would not redirect it",
            "!".yellow(),
            args.url,
            proxy.flag()
        );
    }

    println!("{}", proxy.build(&page));
    Ok(())
}
