//! # Unpaywall Core
//!
//! Host-independent redirect decision logic for member-only story pages.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Whitelist** - Domain matching with subdomain suffix rules
//! - **DOM model** - Owned element tree, loadable from HTML
//! - **Detector** - Member-only story marker detection
//! - **Page** - Location parsing, loop flag and proxy target construction
//! - **Engine** - Per-page redirect session and mutation handling
//! - **Configuration** - TOML configuration with validated defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use unpaywall_core::{Element, RedirectSession};
//!
//! let document = Element::parse_document("<p>Member-only story</p>");
//! let mut session = RedirectSession::default();
//!
//! if let Some(target) = session.evaluate("https://medium.com/@u/post", &document).target() {
//!     println!("navigate to {target}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod detector;
pub mod dom;
pub mod engine;
pub mod error;
pub mod message;
pub mod page;
pub mod whitelist;

// Re-exports for convenience
pub use config::Config;
pub use detector::PaywallDetector;
pub use dom::{Element, MutationRecord, Node};
pub use engine::{Decision, RedirectSession, SessionState, SkipReason};
pub use error::{Error, Result};
pub use message::RuntimeMessage;
pub use page::{PageUrl, ProxyTarget};
pub use whitelist::Whitelist;
