//! Logging initialization
//!
//! Logs go to stderr so command output on stdout stays scriptable.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unpaywall_core::config::LoggingConfig;

use crate::args::{Args, LogFormat};

/// Level from the command line, falling back to the config file
fn resolve_level(args: &Args, settings: &LoggingConfig) -> Level {
    if args.quiet {
        return Level::ERROR;
    }
    match args.verbose {
        0 => Level::from_str(&settings.level).unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn resolve_format(args: &Args, settings: &LoggingConfig) -> LogFormat {
    args.log_format
        .or_else(|| LogFormat::from_str(&settings.format, true).ok())
        .unwrap_or(LogFormat::Text)
}

/// Initialize logging based on CLI arguments and the `[logging]` section
pub fn init(args: &Args, settings: &LoggingConfig) -> Result<()> {
    let level = resolve_level(args, settings);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let log_file = match args.log_file {
        Some(ref path) => Some(Mutex::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path))?,
        )),
        None => None,
    };

    match resolve_format(args, settings) {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(args.verbose >= 2)
                    .with_file(args.verbose >= 3)
                    .with_line_number(args.verbose >= 3),
            );

            match log_file {
                Some(file) => subscriber
                    .with(fmt::layer().with_ansi(false).with_writer(file))
                    .init(),
                None => subscriber.init(),
            }
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr));

            match log_file {
                Some(file) => subscriber.with(fmt::layer().json().with_writer(file)).init(),
                None => subscriber.init(),
            }
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(io::stderr));

            match log_file {
                Some(file) => subscriber
                    .with(fmt::layer().compact().with_ansi(false).with_writer(file))
                    .init(),
                None => subscriber.init(),
            }
        }
    }

    Ok(())
}
