//! Check command - evaluate a page snapshot

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use unpaywall_core::{Decision, Element, MutationRecord, RedirectSession};
use unpaywall_host::{
    ChannelBus, ChannelObserver, ContentScript, MemoryStore, RecordingNavigator, RunReport,
    StaticPage,
};

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Location of the page
    #[arg(short, long)]
    pub url: String,

    /// HTML snapshot of the document ("-" reads stdin; default: empty document)
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// HTML fragment inserted after load, one mutation batch per file
    #[arg(long, value_name = "FILE")]
    pub insert: Vec<PathBuf>,

    /// Stored whitelist domain (repeatable; replaces the configured list)
    #[arg(short, long, value_name = "DOMAIN")]
    pub whitelist: Vec<String>,
}

/// Execute check command
pub fn execute(args: CheckArgs, config: Option<String>) -> Result<()> {
    let config = super::config::load(config.as_deref().map(Path::new))?;
    config.validate().context("Configuration validation failed")?;
    let session = RedirectSession::from_config(&config);

    let document = match args.html {
        Some(ref path) => Element::parse_document(&read_input(path)?),
        None => Element::new("html"),
    };
    let page = StaticPage::new(args.url.clone(), Some(document));

    let store = if args.whitelist.is_empty() {
        MemoryStore::new()
    } else {
        MemoryStore::with_whitelist(args.whitelist.clone())
    };

    let observer = if args.insert.is_empty() {
        ChannelObserver::detached()
    } else {
        let (observer, batches) = ChannelObserver::new();
        for path in &args.insert {
            let record = MutationRecord::from_html(&read_input(path)?);
            batches
                .send(vec![record])
                .context("Mutation observer closed before the run started")?;
        }
        observer
    };

    let navigator = RecordingNavigator::new();
    let script = ContentScript::new(
        session,
        store,
        page,
        observer,
        ChannelBus::closed(),
        navigator.clone(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let report = runtime.block_on(script.run());

    debug!(visits = ?navigator.visits(), "Run finished");
    print_report(&args.url, &report);

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read HTML from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_report(url: &str, report: &RunReport) {
    println!("Location: {}", url.cyan());

    match report.initial {
        Some(Decision::Redirect { .. }) => println!("Initial scan: {}", "redirect".green()),
        Some(Decision::Skip(reason)) => println!("Initial scan: {}", reason.to_string().yellow()),
        None => println!("Initial scan: {}", "not run".dimmed()),
    }

    if report.batches > 0 {
        println!("Mutation batches: {}", report.batches);
    }

    match report.target {
        Some(ref target) if report.navigated => println!("{} Redirect to {}", "→".green(), target),
        Some(ref target) => println!("{} Redirect to {} failed", "!".yellow(), target),
        None => println!("{} No redirect", "✗".red()),
    }
}
