//! Error types for unpaywall-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Main error type for unpaywall-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Page location could not be parsed as an absolute URL
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        /// The offending location string
        url: String,
        /// Underlying parser error
        #[source]
        source: url::ParseError,
    },

    /// Domain entry failed validation
    #[error("Invalid domain: {domain}")]
    InvalidDomain {
        /// The rejected domain
        domain: String,
    },

    /// Runtime message could not be decoded
    #[error("Malformed runtime message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config_value("redirect.flag_param", "must not be empty");
        assert!(err.to_string().contains("redirect.flag_param"));
        assert!(err.to_string().contains("must not be empty"));

        let err = Error::InvalidDomain {
            domain: "-bad-".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid domain: -bad-");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let err = Error::invalid_url("not a url", url::ParseError::RelativeUrlWithoutBase);
        match &err {
            Error::InvalidUrl { url, .. } => assert_eq!(url, "not a url"),
            _ => panic!("Wrong error type"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
