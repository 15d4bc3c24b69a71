//! Member-only story detection
//!
//! Scans a DOM subtree for the paywall marker phrase. Only presence
//! matters, so the detector returns a plain boolean.

use crate::dom::Element;
use tracing::trace;

/// Marker phrases, lowercase; the second uses U+2011 NON-BREAKING HYPHEN
pub const DEFAULT_PHRASES: [&str; 2] = ["member-only story", "member\u{2011}only story"];

/// Texts shorter than this cannot contain the marker
pub const DEFAULT_MIN_TEXT_LEN: usize = 6;

/// Common text-bearing elements scanned first
const TEXT_TAGS: [&str; 9] = ["p", "span", "div", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Paragraphs scanned again as a fallback
const FALLBACK_TAGS: [&str; 1] = ["p"];

/// Detector for the "member-only story" marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaywallDetector {
    phrases: Vec<String>,
    min_text_len: usize,
}

impl Default for PaywallDetector {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| (*p).to_string()).collect(),
            min_text_len: DEFAULT_MIN_TEXT_LEN,
        }
    }
}

impl PaywallDetector {
    /// Create a detector with custom phrases; phrases are matched lowercase
    pub fn new(phrases: Vec<String>, min_text_len: usize) -> Self {
        Self {
            phrases: phrases.into_iter().map(|p| p.to_lowercase()).collect(),
            min_text_len,
        }
    }

    /// Marker phrases in match order
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Check whether the subtree under `root` carries the marker
    ///
    /// Only descendants of `root` are candidates; `root` itself is not.
    /// The first pass trims each candidate's text and skips anything too
    /// short to hold the marker. The second pass re-reads every paragraph
    /// untrimmed, since the wrapping element differs between page templates.
    pub fn detect(&self, root: &Element) -> bool {
        for el in root.find_all(&TEXT_TAGS) {
            let text = el.text_content();
            let text = text.trim();
            if text.chars().count() < self.min_text_len {
                continue;
            }
            if self.matches(text) {
                trace!(tag = el.name(), "Marker found in text element");
                return true;
            }
        }

        for el in root.find_all(&FALLBACK_TAGS) {
            if self.matches(&el.text_content()) {
                trace!("Marker found in paragraph fallback");
                return true;
            }
        }

        false
    }

    fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.phrases.iter().any(|phrase| lower.contains(phrase.as_str()))
    }
}
