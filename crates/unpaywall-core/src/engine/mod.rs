//! Redirect decision engine
//!
//! One [`RedirectSession`] exists per page load. It caches the whitelist,
//! runs the guard chain on every scan request and moves from
//! [`SessionState::Idle`] to [`SessionState::Attempted`] at most once.
//!
//! Guard chain, in order:
//! 1. already attempted on this page
//! 2. location already carries the redirect flag
//! 3. location cannot be parsed
//! 4. host not whitelisted
//! 5. no member-only marker in the scanned subtree
//!
//! Only when every guard passes does the session transition and hand back
//! the proxy target. The transition happens before the caller navigates,
//! so a failed navigation never leads to a second attempt.

mod watcher;

use crate::config::Config;
use crate::detector::PaywallDetector;
use crate::dom::Element;
use crate::message::RuntimeMessage;
use crate::page::{PageUrl, ProxyTarget};
use crate::whitelist::Whitelist;
use std::fmt;
use tracing::{debug, info, instrument};

/// Lifecycle of a session; `Attempted` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No redirect attempted yet
    #[default]
    Idle,
    /// A redirect was attempted for this page load
    Attempted,
}

/// Why a scan did not produce a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The session already attempted a redirect
    AlreadyAttempted,
    /// The page was reached through a redirect
    AlreadyRedirected,
    /// The location is not an absolute URL
    InvalidLocation,
    /// The host is not on the whitelist
    NotWhitelisted,
    /// No member-only marker in the scanned subtree
    NoPaywall,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::AlreadyAttempted => "redirect already attempted",
            Self::AlreadyRedirected => "page already redirected",
            Self::InvalidLocation => "location is not an absolute URL",
            Self::NotWhitelisted => "host not whitelisted",
            Self::NoPaywall => "no member-only marker",
        };
        f.write_str(reason)
    }
}

/// Outcome of one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Replace the current location with `target`
    Redirect {
        /// Proxy URL to navigate to
        target: String,
    },
    /// Leave the page alone
    Skip(SkipReason),
}

impl Decision {
    /// Proxy target if this is a redirect
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Redirect { target } => Some(target),
            Self::Skip(_) => None,
        }
    }

    /// Check if this is a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Per-page redirect state
#[derive(Debug, Clone)]
pub struct RedirectSession {
    whitelist: Whitelist,
    detector: PaywallDetector,
    proxy: ProxyTarget,
    state: SessionState,
}

impl Default for RedirectSession {
    fn default() -> Self {
        Self::new(Whitelist::default(), PaywallDetector::default(), ProxyTarget::default())
    }
}

impl RedirectSession {
    /// Create a session in the idle state
    pub fn new(whitelist: Whitelist, detector: PaywallDetector, proxy: ProxyTarget) -> Self {
        Self {
            whitelist,
            detector,
            proxy,
            state: SessionState::Idle,
        }
    }

    /// Create a session from configuration
    ///
    /// The configured domains seed the cache until the store answers.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Whitelist::new(config.whitelist.domains.clone()),
            PaywallDetector::new(config.detector.phrases.clone(), config.detector.min_text_len),
            ProxyTarget::new(&config.redirect.proxy_origin, &config.redirect.flag_param),
        )
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if a redirect was already attempted
    pub fn is_attempted(&self) -> bool {
        self.state == SessionState::Attempted
    }

    /// Cached whitelist
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Replace the cached whitelist without scanning
    pub fn replace_whitelist(&mut self, whitelist: Whitelist) {
        debug!(domains = ?whitelist.domains(), "Whitelist replaced");
        self.whitelist = whitelist;
    }

    /// Apply a pushed runtime message
    pub fn apply_message(&mut self, message: RuntimeMessage) {
        match message {
            RuntimeMessage::UpdateWhitelist { whitelist } => {
                self.replace_whitelist(Whitelist::from_pushed(whitelist));
            }
            RuntimeMessage::Unknown => debug!("Ignoring unknown runtime message"),
        }
    }

    /// Run the guard chain for `root` on the page at `location`
    #[instrument(level = "debug", skip(self, root), fields(root = root.name()))]
    pub fn evaluate(&mut self, location: &str, root: &Element) -> Decision {
        if self.is_attempted() {
            return Decision::Skip(SkipReason::AlreadyAttempted);
        }

        let page = match PageUrl::parse(location) {
            Ok(page) => page,
            Err(e) => {
                debug!(error = %e, "Location not parseable, skipping");
                return Decision::Skip(SkipReason::InvalidLocation);
            }
        };

        if page.is_redirected(self.proxy.flag()) {
            debug!("Page already redirected, skipping");
            return Decision::Skip(SkipReason::AlreadyRedirected);
        }

        if !self.whitelist.is_whitelisted(page.host()) {
            debug!(host = page.host(), "Host not whitelisted, skipping");
            return Decision::Skip(SkipReason::NotWhitelisted);
        }

        if !self.detector.detect(root) {
            return Decision::Skip(SkipReason::NoPaywall);
        }

        self.state = SessionState::Attempted;
        let target = self.proxy.build(&page);
        info!(host = page.host(), target = %target, "Member-only story detected, redirecting");

        Decision::Redirect { target }
    }
}
