//! Domain whitelist for redirect activation
//!
//! The redirect logic only runs on pages whose hostname is whitelisted.
//! The list itself lives in an external store; this module holds the
//! in-memory copy and the matching rules:
//! - Exact domain matching ("medium.com")
//! - Suffix matching ("medium.com" matches "blog.medium.com")
//! - Never substring matching ("medium.com" does not match "notmedium.com")

mod domain_list;

pub use domain_list::{is_valid_domain, Whitelist, DEFAULT_DOMAINS, WHITELIST_KEY};
