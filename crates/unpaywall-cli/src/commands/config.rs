//! Config command - configuration management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unpaywall_core::Config;

/// Config file name looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "unpaywall.toml";

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Config file to show (default: detect)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate a configuration file with the built-in defaults
    Generate {
        /// Output file path
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show config file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs, global: Option<String>) -> Result<()> {
    match args.action {
        ConfigAction::Show { file } => {
            let file = file.or_else(|| global.map(PathBuf::from));
            show_config(file)
        }
        ConfigAction::Generate { output, force } => generate_config(&output, force),
        ConfigAction::Validate { file } => validate_config(&file),
        ConfigAction::Paths => show_paths(),
    }
}

/// Load the effective configuration
///
/// An explicit path must exist; otherwise the search paths are tried and the
/// built-in defaults are used when nothing is found.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Config::load(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => Ok(Config::default()),
    }
}

fn show_config(file: Option<PathBuf>) -> Result<()> {
    let config = load(file.as_deref())?;

    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

    println!("{}", toml_str);
    Ok(())
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let toml_str = Config::default()
        .to_toml()
        .context("Failed to serialize config")?;

    let content = format!(
        "# Unpaywall Configuration\n\
         # Domains, proxy origin and marker phrases used by the redirect logic\n\n\
         {}",
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());

    Ok(())
}

fn validate_config(file: &Path) -> Result<()> {
    let config =
        Config::load(file).with_context(|| format!("Failed to load config from {:?}", file))?;

    config.validate().context("Configuration validation failed")?;

    println!("{} Configuration is valid", "✓".green());
    println!("  Whitelisted domains: {}", config.whitelist.domains.len());
    println!("  Proxy origin: {}", config.redirect.proxy_origin);
    println!("  Redirect flag: {}", config.redirect.flag_param);
    println!("  Marker phrases: {}", config.detector.phrases.len());

    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Configuration file search paths:");
    println!();
    println!("  1. ./{}", CONFIG_FILE_NAME);

    if let Some(config_dir) = directories::ProjectDirs::from("", "", "unpaywall") {
        println!("  2. {}", config_dir.config_dir().join(CONFIG_FILE_NAME).display());
    }

    Ok(())
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let config_dir = directories::ProjectDirs::from("", "", "unpaywall")?;
    let path = config_dir.config_dir().join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}
