//! Host error types

use thiserror::Error;

/// Errors raised by host collaborators
#[derive(Error, Debug)]
pub enum HostError {
    /// The whitelist store could not be read
    #[error("Whitelist store unavailable: {0}")]
    Store(String),

    /// The mutation observer could not be attached
    #[error("Cannot observe document: {0}")]
    ObserveFailed(String),

    /// Location replacement failed
    #[error("Navigation to '{url}' failed: {reason}")]
    Navigation {
        /// Target that could not be loaded
        url: String,
        /// Failure reason
        reason: String,
    },

    /// A single-consumer channel was subscribed twice
    #[error("{0} already subscribed")]
    AlreadySubscribed(&'static str),

    /// Core library error
    #[error(transparent)]
    Core(#[from] unpaywall_core::Error),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

impl HostError {
    /// Create a navigation error
    pub fn navigation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
