//! Page identity and proxy target construction
//!
//! The current location is parsed once per evaluation. A reserved query
//! parameter marks pages that were reached through a redirect; it travels
//! with the URL, so no extra state is needed to prevent loops.

use crate::error::{Error, Result};
use url::Url;

/// Query parameter marking an already-redirected page
pub const REDIRECT_FLAG: &str = "freedium-redirected";

/// Value the redirect flag is set to
pub const REDIRECT_FLAG_VALUE: &str = "1";

/// Proxy mirror origin, including the trailing slash
pub const PROXY_ORIGIN: &str = "https://freedium.cfd/";

/// Parsed location of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    url: Url,
}

impl PageUrl {
    /// Parse an absolute location string
    pub fn parse(location: &str) -> Result<Self> {
        let url = Url::parse(location).map_err(|e| Error::invalid_url(location, e))?;
        Ok(Self { url })
    }

    /// Hostname, empty for URLs without a host
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// Serialized URL
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Check whether the first `flag` parameter carries the redirect value
    pub fn is_redirected(&self, flag: &str) -> bool {
        self.url
            .query_pairs()
            .find(|(key, _)| key == flag)
            .is_some_and(|(_, value)| value == REDIRECT_FLAG_VALUE)
    }

    /// Copy of the URL with `flag` set to the redirect value
    ///
    /// The first existing `flag` parameter is overwritten in place and any
    /// later duplicates are dropped; otherwise the flag is appended. Other
    /// parameters keep their order and the fragment stays at the end.
    pub fn flagged(&self, flag: &str) -> Url {
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        let mut set = false;
        let mut rebuilt = Vec::with_capacity(pairs.len() + 1);
        for (key, value) in pairs {
            if key != flag {
                rebuilt.push((key, value));
            } else if !set {
                rebuilt.push((key, REDIRECT_FLAG_VALUE.to_string()));
                set = true;
            }
        }
        if !set {
            rebuilt.push((flag.to_string(), REDIRECT_FLAG_VALUE.to_string()));
        }

        url.query_pairs_mut().clear().extend_pairs(rebuilt);
        url
    }
}

impl std::str::FromStr for PageUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Builder for proxy mirror URLs
///
/// The target is the proxy origin followed by the flagged page URL,
/// verbatim: `https://freedium.cfd/https://medium.com/post?freedium-redirected=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    origin: String,
    flag: String,
}

impl Default for ProxyTarget {
    fn default() -> Self {
        Self::new(PROXY_ORIGIN, REDIRECT_FLAG)
    }
}

impl ProxyTarget {
    /// Create a target builder for a proxy origin and flag parameter
    pub fn new(origin: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            flag: flag.into(),
        }
    }

    /// Proxy origin
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Loop-prevention query parameter
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Build the proxy URL for a page
    pub fn build(&self, page: &PageUrl) -> String {
        format!("{}{}", self.origin, page.flagged(&self.flag))
    }
}
