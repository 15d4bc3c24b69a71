//! Host collaborator interfaces
//!
//! The redirect session never touches a real browser. Everything it needs
//! from the page context comes through these traits, so the event loop can
//! be driven by synthetic events in tests.

use crate::Result;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use unpaywall_core::{Element, MutationRecord, RuntimeMessage};

/// Loading state of the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Still parsing; wait for the ready signal before scanning
    Loading,
    /// Parsed, subresources may still load
    Interactive,
    /// Fully loaded
    #[default]
    Complete,
}

/// Persistent key-value store holding the whitelist
#[async_trait]
pub trait WhitelistStore: Send + Sync {
    /// Read the list stored under `key`; `None` if never written
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>>;
}

/// Point-to-point channel for pushed runtime messages
pub trait MessageBus {
    /// Start receiving messages for this page context
    fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<RuntimeMessage>>;
}

/// Subtree child-list observer on the document root
///
/// Each received item is one batch of mutation records. Batches are
/// delivered in order and never overlap.
pub trait DomObserver {
    /// Attach to the document root
    fn observe(&self) -> Result<mpsc::UnboundedReceiver<Vec<MutationRecord>>>;
}

/// Read access to the current document
pub trait Page {
    /// Full URL of the current location
    fn location(&self) -> String;

    /// Current loading state
    fn ready_state(&self) -> ReadyState;

    /// Document root, if one exists
    fn document(&self) -> Option<Element>;

    /// Signal fired once the document finishes parsing
    fn ready(&self) -> oneshot::Receiver<()>;
}

/// Location replacement without a new history entry
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Replace the current location with `url`
    fn replace(&mut self, url: &str) -> Result<()>;
}
