//! Unpaywall Host Abstraction Layer
//!
//! This crate connects the redirect session to its page context.
//!
//! ## Collaborators
//!
//! - **WhitelistStore**: persistent list of whitelisted domains
//! - **MessageBus**: pushed whitelist updates
//! - **DomObserver**: batches of inserted nodes
//! - **Page** / **Navigator**: current document and location replacement
//!
//! [`ContentScript`] runs the event loop over any implementation of these;
//! the [`memory`] module provides in-process ones.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
pub use error::{HostError, Result};

mod traits;
pub use traits::{DomObserver, MessageBus, Navigator, Page, ReadyState, WhitelistStore};

pub mod memory;
pub use memory::{ChannelBus, ChannelObserver, MemoryStore, RecordingNavigator, StaticPage};

mod content_script;
pub use content_script::{ContentScript, RunReport};
