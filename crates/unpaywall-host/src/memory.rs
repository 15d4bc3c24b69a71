//! In-memory collaborators
//!
//! Used by the CLI to evaluate static snapshots and by tests to feed
//! synthetic events into the content script.

use crate::traits::{DomObserver, MessageBus, Navigator, Page, ReadyState, WhitelistStore};
use crate::{HostError, Result};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use unpaywall_core::whitelist::WHITELIST_KEY;
use unpaywall_core::{Element, MutationRecord, RuntimeMessage};

/// Shared map-backed store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a whitelist
    pub fn with_whitelist(domains: Vec<String>) -> Self {
        let store = Self::new();
        store.set(WHITELIST_KEY, domains);
        store
    }

    /// Write a value
    pub fn set(&self, key: &str, value: Vec<String>) {
        self.values.write().insert(key.to_string(), value);
    }

    /// Remove a value
    pub fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

#[async_trait]
impl WhitelistStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.values.read().get(key).cloned())
    }
}

/// Single-subscriber channel taken on first use
#[derive(Debug)]
struct Slot<T> {
    receiver: Mutex<Option<mpsc::UnboundedReceiver<T>>>,
}

impl<T> Slot<T> {
    fn new() -> (Self, mpsc::UnboundedSender<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let slot = Self {
            receiver: Mutex::new(Some(rx)),
        };
        (slot, tx)
    }

    fn take(&self, what: &'static str) -> Result<mpsc::UnboundedReceiver<T>> {
        self.receiver
            .lock()
            .take()
            .ok_or(HostError::AlreadySubscribed(what))
    }
}

/// Message bus fed through an unbounded sender
#[derive(Debug)]
pub struct ChannelBus {
    slot: Slot<RuntimeMessage>,
}

impl ChannelBus {
    /// Create a bus and the sender that pushes into it
    pub fn new() -> (Self, mpsc::UnboundedSender<RuntimeMessage>) {
        let (slot, tx) = Slot::new();
        (Self { slot }, tx)
    }

    /// Create a bus that never delivers anything
    pub fn closed() -> Self {
        Self::new().0
    }
}

impl MessageBus for ChannelBus {
    fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<RuntimeMessage>> {
        self.slot.take("message bus")
    }
}

/// Mutation observer fed through an unbounded sender
#[derive(Debug)]
pub struct ChannelObserver {
    slot: Option<Slot<Vec<MutationRecord>>>,
}

impl ChannelObserver {
    /// Create an observer and the sender that delivers batches to it
    pub fn new() -> (Self, mpsc::UnboundedSender<Vec<MutationRecord>>) {
        let (slot, tx) = Slot::new();
        (Self { slot: Some(slot) }, tx)
    }

    /// Create an observer with no attachable root
    pub fn detached() -> Self {
        Self { slot: None }
    }
}

impl DomObserver for ChannelObserver {
    fn observe(&self) -> Result<mpsc::UnboundedReceiver<Vec<MutationRecord>>> {
        match &self.slot {
            Some(slot) => slot.take("mutation observer"),
            None => Err(HostError::ObserveFailed("no document root to attach to".to_string())),
        }
    }
}

/// Fixed location and document snapshot
#[derive(Debug)]
pub struct StaticPage {
    location: String,
    document: Option<Element>,
    ready_state: ReadyState,
    ready: Mutex<Option<oneshot::Receiver<()>>>,
}

impl StaticPage {
    /// Create a fully loaded page
    pub fn new(location: impl Into<String>, document: Option<Element>) -> Self {
        Self {
            location: location.into(),
            document,
            ready_state: ReadyState::Complete,
            ready: Mutex::new(None),
        }
    }

    /// Create a page that is still loading, with the sender that marks it ready
    pub fn loading(location: impl Into<String>, document: Option<Element>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let page = Self {
            location: location.into(),
            document,
            ready_state: ReadyState::Loading,
            ready: Mutex::new(Some(rx)),
        };
        (page, tx)
    }

    /// Create a page by parsing an HTML snapshot
    pub fn from_html(location: impl Into<String>, html: &str) -> Self {
        Self::new(location, Some(Element::parse_document(html)))
    }
}

impl Page for StaticPage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn document(&self) -> Option<Element> {
        self.document.clone()
    }

    fn ready(&self) -> oneshot::Receiver<()> {
        match self.ready.lock().take() {
            Some(rx) => rx,
            None => {
                // Already loaded: resolve immediately
                let (tx, rx) = oneshot::channel();
                let _ = tx.send(());
                rx
            }
        }
    }
}

/// Navigator that records every replacement request
///
/// Clones share the same log, so a handle kept outside the content script
/// can inspect what was requested after the run.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNavigator {
    /// Create a navigator that accepts every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator that records requests and then fails them
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requested targets, in order
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&mut self, url: &str) -> Result<()> {
        self.visits.lock().push(url.to_string());
        if self.fail {
            return Err(HostError::navigation(url, "navigation blocked"));
        }
        debug!(url, "Location replaced");
        Ok(())
    }
}
