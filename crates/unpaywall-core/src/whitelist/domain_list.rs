//! Whitelist storage and hostname matching

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Domains used whenever the store has no value
pub const DEFAULT_DOMAINS: [&str; 2] = ["medium.com", "infosecwriteups.com"];

/// Store key holding the whitelist
pub const WHITELIST_KEY: &str = "whitelistDomains";

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("domain pattern is valid")
});

/// Check whether a string is an acceptable whitelist entry
///
/// Entries are dot-separated labels of alphanumerics with inner hyphens,
/// each label at most 63 characters, and the whole entry at least
/// 3 characters long.
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() >= 3 && DOMAIN_RE.is_match(domain)
}

/// Ordered list of whitelisted domains
///
/// Order and duplicates are preserved as received from the store.
/// Matching is case-insensitive on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    domains: Vec<String>,
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAINS.iter().map(|d| (*d).to_string()).collect())
    }
}

impl Whitelist {
    /// Create a whitelist from stored entries
    pub fn new(domains: Vec<String>) -> Self {
        Self { domains }
    }

    /// Create a whitelist from a pushed or stored value
    ///
    /// An absent value falls back to [`DEFAULT_DOMAINS`]. An empty list is
    /// kept as-is, since only a missing value means "never configured".
    pub fn from_pushed(domains: Option<Vec<String>>) -> Self {
        match domains {
            Some(domains) => Self::new(domains),
            None => {
                debug!("No whitelist value, using defaults");
                Self::default()
            }
        }
    }

    /// Check if a hostname is whitelisted
    ///
    /// True if the hostname equals an entry or is a subdomain of it.
    pub fn is_whitelisted(&self, hostname: &str) -> bool {
        let hostname = hostname.to_lowercase();

        self.domains.iter().any(|domain| {
            let domain = domain.to_lowercase();
            hostname == domain
                || hostname
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Get the entries in stored order
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if the whitelist has no entries
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl From<Vec<String>> for Whitelist {
    fn from(domains: Vec<String>) -> Self {
        Self::new(domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist(domains: &[&str]) -> Whitelist {
        Whitelist::new(domains.iter().map(|d| d.to_string()).collect())
    }

    #[test]
    fn test_exact_match() {
        let list = whitelist(&["medium.com"]);

        assert!(list.is_whitelisted("medium.com"));
        assert!(!list.is_whitelisted("other.com"));
    }

    #[test]
    fn test_subdomain_match() {
        let list = whitelist(&["medium.com"]);

        assert!(list.is_whitelisted("blog.medium.com"));
        assert!(list.is_whitelisted("deep.sub.medium.com"));
    }

    #[test]
    fn test_no_substring_match() {
        let list = whitelist(&["medium.com"]);

        assert!(!list.is_whitelisted("notmedium.com"));
        assert!(!list.is_whitelisted("medium.com.evil.org"));
        assert!(!list.is_whitelisted("com"));
    }

    #[test]
    fn test_case_insensitive() {
        let list = whitelist(&["Medium.COM"]);

        assert!(list.is_whitelisted("MEDIUM.com"));
        assert!(list.is_whitelisted("Blog.Medium.Com"));
    }

    #[test]
    fn test_default_pair() {
        let list = Whitelist::default();

        assert_eq!(list.domains(), ["medium.com", "infosecwriteups.com"]);
        assert!(list.is_whitelisted("infosecwriteups.com"));
    }

    #[test]
    fn test_from_pushed() {
        assert_eq!(Whitelist::from_pushed(None), Whitelist::default());
        assert!(Whitelist::from_pushed(Some(Vec::new())).is_empty());

        let list = Whitelist::from_pushed(Some(vec!["example.org".to_string()]));
        assert_eq!(list.len(), 1);
        assert!(!list.is_whitelisted("medium.com"));
    }

    #[test]
    fn test_duplicates_tolerated() {
        let list = whitelist(&["medium.com", "medium.com"]);
        assert_eq!(list.len(), 2);
        assert!(list.is_whitelisted("medium.com"));
    }

    #[test]
    fn test_valid_domain() {
        assert!(is_valid_domain("medium.com"));
        assert!(is_valid_domain("sub-domain.example.co.uk"));
        assert!(is_valid_domain("localhost"));

        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("ab"));
        assert!(!is_valid_domain("-medium.com"));
        assert!(!is_valid_domain("medium-.com"));
        assert!(!is_valid_domain("medium..com"));
        assert!(!is_valid_domain("https://medium.com"));
        assert!(!is_valid_domain(&format!("{}.com", "a".repeat(64))));
    }
}
