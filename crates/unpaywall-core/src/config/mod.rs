//! Configuration management
//!
//! Strongly-typed configuration with TOML support. Every section has
//! defaults matching the built-in behaviour, so an empty file is valid.

use crate::detector::{DEFAULT_MIN_TEXT_LEN, DEFAULT_PHRASES};
use crate::error::{Error, Result};
use crate::page::{PROXY_ORIGIN, REDIRECT_FLAG};
use crate::whitelist::{is_valid_domain, DEFAULT_DOMAINS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed whitelist used until the store answers
    pub whitelist: WhitelistConfig,

    /// Proxy target settings
    pub redirect: RedirectConfig,

    /// Marker detection settings
    pub detector: DetectorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for domain in &self.whitelist.domains {
            if !is_valid_domain(domain) {
                return Err(Error::InvalidDomain {
                    domain: domain.clone(),
                });
            }
        }

        let origin = &self.redirect.proxy_origin;
        match Url::parse(origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(Error::config_value(
                    "redirect.proxy_origin",
                    format!("'{origin}' is not an absolute http(s) URL"),
                ));
            }
        }
        if !origin.ends_with('/') {
            return Err(Error::config_value(
                "redirect.proxy_origin",
                "Must end with '/'",
            ));
        }

        if self.redirect.flag_param.trim().is_empty() {
            return Err(Error::config_value("redirect.flag_param", "Must not be empty"));
        }

        if self.detector.phrases.iter().all(|p| p.trim().is_empty()) {
            return Err(Error::config_value(
                "detector.phrases",
                "At least one non-empty phrase is required",
            ));
        }

        if self.detector.min_text_len == 0 {
            return Err(Error::config_value("detector.min_text_len", "Must be at least 1"));
        }

        Ok(())
    }
}

/// Whitelist seed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Domains on which redirect logic is active
    pub domains: Vec<String>,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            domains: DEFAULT_DOMAINS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

/// Proxy target configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Proxy mirror origin, with trailing slash
    pub proxy_origin: String,
    /// Loop-prevention query parameter
    pub flag_param: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            proxy_origin: PROXY_ORIGIN.to_string(),
            flag_param: REDIRECT_FLAG.to_string(),
        }
    }
}

/// Marker detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Marker phrases (case-insensitive)
    pub phrases: Vec<String>,
    /// Texts shorter than this are skipped in the first pass
    pub min_text_len: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| (*p).to_string()).collect(),
            min_text_len: DEFAULT_MIN_TEXT_LEN,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Output format (text, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.whitelist.domains, ["medium.com", "infosecwriteups.com"]);
        assert_eq!(config.redirect.proxy_origin, "https://freedium.cfd/");
        assert_eq!(config.redirect.flag_param, "freedium-redirected");
        assert_eq!(config.detector.min_text_len, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.whitelist.domains.push("example.org".to_string());

        let toml = config.to_toml().unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_parse_partial() {
        let toml_content = r#"
[whitelist]
domains = ["betterprogramming.pub"]

[detector]
min_text_len = 8
"#;
        let config = Config::from_toml(toml_content).unwrap();
        assert_eq!(config.whitelist.domains, ["betterprogramming.pub"]);
        assert_eq!(config.detector.min_text_len, 8);
        assert_eq!(config.detector.phrases.len(), 2);
        assert_eq!(config.redirect, RedirectConfig::default());
    }

    #[test]
    fn test_toml_parse_invalid() {
        assert!(matches!(
            Config::from_toml("this is not [valid toml"),
            Err(Error::TomlParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_domain() {
        let mut config = Config::default();
        config.whitelist.domains.push("not a domain".to_string());
        assert!(matches!(config.validate(), Err(Error::InvalidDomain { .. })));
    }

    #[test]
    fn test_validate_proxy_origin() {
        let mut config = Config::default();
        config.redirect.proxy_origin = "ftp://mirror.example/".to_string();
        assert!(config.validate().is_err());

        config.redirect.proxy_origin = "https://mirror.example".to_string();
        assert!(config.validate().is_err());

        config.redirect.proxy_origin = "https://mirror.example/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_detector() {
        let mut config = Config::default();
        config.detector.phrases = vec!["  ".to_string()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.detector.min_text_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/unpaywall.toml"),
            Err(Error::ConfigNotFound { .. })
        ));
    }
}
