//! Command-line argument parsing

use crate::commands::Command;
use clap::{Parser, ValueEnum};

/// Unpaywall - member-only story redirector
///
/// Evaluates pages the way the browser content script does: whitelisted
/// hosts showing a member-only marker are sent to a proxy mirror, once.
#[derive(Parser, Debug)]
#[command(name = "unpaywall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true, env = "UNPAYWALL_CONFIG")]
    pub config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for logs (default: `[logging] format`, then text)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Log file path
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["unpaywall", "-v", "target", "https://medium.com/p"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["unpaywall", "target", "https://medium.com/p", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_global_options() {
        let args = Args::parse_from([
            "unpaywall",
            "--log-format",
            "json",
            "check",
            "--url",
            "https://medium.com/p",
            "--config",
            "custom.toml",
        ]);

        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert!(matches!(args.command, Command::Check(_)));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["unpaywall"]).is_err());
    }
}
