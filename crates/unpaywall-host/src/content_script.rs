//! Content script event loop
//!
//! Composes a [`RedirectSession`] with the host collaborators:
//! - the whitelist fetch, which gates only the initial scan
//! - the document-ready signal, when the page is still loading
//! - pushed runtime messages, which refresh the cached whitelist
//! - mutation batches, which re-run the guard chain on inserted subtrees
//!
//! Everything runs on one task; sources are polled cooperatively and
//! handlers never overlap. When several are ready at once, the whitelist
//! fetch wins over the ready signal, which wins over pushed messages,
//! which win over mutation batches. Navigation and observer failures are logged
//! and swallowed so the host page is never disturbed.

use crate::traits::{DomObserver, MessageBus, Navigator, Page, ReadyState, WhitelistStore};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};
use unpaywall_core::whitelist::WHITELIST_KEY;
use unpaywall_core::{Decision, RedirectSession, SessionState, Whitelist};

/// Summary of one content script run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Final session state
    pub state: SessionState,
    /// Decision of the initial scan, if it ran
    pub initial: Option<Decision>,
    /// Proxy target of the redirect attempt
    pub target: Option<String>,
    /// Whether the navigator accepted the redirect
    pub navigated: bool,
    /// Whether the mutation observer was attached
    pub observing: bool,
    /// Mutation batches handled
    pub batches: usize,
    /// Runtime messages handled
    pub messages: usize,
}

/// Per-page driver for the redirect session
pub struct ContentScript<S, P, O, B, N> {
    session: RedirectSession,
    store: S,
    page: P,
    observer: O,
    bus: B,
    navigator: N,
}

impl<S, P, O, B, N> ContentScript<S, P, O, B, N>
where
    S: WhitelistStore,
    P: Page,
    O: DomObserver,
    B: MessageBus,
    N: Navigator,
{
    /// Create a content script around a fresh session
    pub fn new(session: RedirectSession, store: S, page: P, observer: O, bus: B, navigator: N) -> Self {
        Self {
            session,
            store,
            page,
            observer,
            bus,
            navigator,
        }
    }

    /// Run until the page navigates away or every event source is closed
    #[instrument(skip(self), fields(location = %self.page.location()))]
    pub async fn run(self) -> RunReport {
        let Self {
            mut session,
            store,
            page,
            observer,
            bus,
            mut navigator,
        } = self;

        let mut report = RunReport::default();

        let mut messages = match bus.subscribe() {
            Ok(rx) => Some(rx),
            Err(e) => {
                warn!(error = %e, "Message bus unavailable, whitelist updates disabled");
                None
            }
        };

        let mut mutations = match observer.observe() {
            Ok(rx) => {
                report.observing = true;
                Some(rx)
            }
            Err(e) => {
                debug!(error = %e, "Mutation observer not attached, initial scan only");
                None
            }
        };

        let mut fetch = store.get(WHITELIST_KEY);
        let mut loaded = false;
        let mut ready: Option<oneshot::Receiver<()>> = None;

        loop {
            if report.navigated {
                break;
            }
            if loaded && ready.is_none() && messages.is_none() && mutations.is_none() {
                break;
            }

            // Sources are drained in declaration order
            tokio::select! {
                biased;

                result = &mut fetch, if !loaded => {
                    loaded = true;
                    match result {
                        Ok(Some(domains)) => session.replace_whitelist(Whitelist::new(domains)),
                        Ok(None) => debug!("No stored whitelist, keeping defaults"),
                        Err(e) => warn!(error = %e, "Whitelist fetch failed, keeping defaults"),
                    }

                    if page.ready_state() == ReadyState::Loading {
                        debug!("Document still loading, deferring initial scan");
                        ready = Some(page.ready());
                    } else {
                        initial_scan(&mut session, &page, &mut navigator, &mut report);
                    }
                }
                fired = wait_ready(&mut ready), if ready.is_some() => {
                    ready = None;
                    if fired {
                        initial_scan(&mut session, &page, &mut navigator, &mut report);
                    } else {
                        debug!("Ready signal dropped, skipping initial scan");
                    }
                }
                message = next_from(&mut messages), if messages.is_some() => {
                    match message {
                        Some(message) => {
                            report.messages += 1;
                            session.apply_message(message);
                        }
                        None => messages = None,
                    }
                }
                batch = next_from(&mut mutations), if mutations.is_some() => {
                    match batch {
                        Some(records) => {
                            report.batches += 1;
                            let decision = session.process_mutations(&page.location(), &records);
                            follow(decision, &mut navigator, &mut report);
                        }
                        None => mutations = None,
                    }
                }
                else => break,
            }
        }

        report.state = session.state();
        report
    }
}

fn initial_scan<P: Page, N: Navigator>(
    session: &mut RedirectSession,
    page: &P,
    navigator: &mut N,
    report: &mut RunReport,
) {
    let Some(root) = page.document() else {
        debug!("No document root, skipping initial scan");
        return;
    };

    let decision = session.evaluate(&page.location(), &root);
    report.initial = Some(decision.clone());
    follow(decision, navigator, report);
}

/// Navigate for a redirect decision; failures leave the page as it is
fn follow<N: Navigator>(decision: Decision, navigator: &mut N, report: &mut RunReport) {
    let Decision::Redirect { target } = decision else {
        return;
    };

    match navigator.replace(&target) {
        Ok(()) => {
            info!(target = %target, "Navigated to proxy");
            report.navigated = true;
        }
        Err(e) => debug!(error = %e, "Navigation failed, page left unmodified"),
    }
    report.target = Some(target);
}

async fn next_from<T>(rx: &mut Option<mpsc::UnboundedReceiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn wait_ready(rx: &mut Option<oneshot::Receiver<()>>) -> bool {
    match rx {
        Some(rx) => rx.await.is_ok(),
        None => std::future::pending().await,
    }
}
