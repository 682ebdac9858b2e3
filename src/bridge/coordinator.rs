//! Coordinator - the privileged side of the message bridge.
//!
//! Thin glue over the settings store and the per-page endpoints: seeds
//! defaults on install, answers the global toggle command by flipping
//! `enabled` and broadcasting to every page, and keeps a page-activity
//! map pruned at a 30-minute horizon. Delivery is best-effort: pages
//! without a live engine are silently skipped.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::settings::{Settings, SettingsStore, load_or_default};

use super::{BridgeError, Request, Response};

/// Pages quiet for longer than this are dropped from the activity map.
pub const PAGE_ACTIVITY_TIMEOUT: Duration = Duration::from_secs(30 * 60);

// =============================================================================
// Page Endpoint
// =============================================================================

/// Handle to one page's engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

/// One-shot delivery into a page. Implementations decide the transport.
pub trait PageEndpoint {
    fn send(&mut self, request: &Request) -> Result<Response, BridgeError>;
}

// =============================================================================
// Coordinator
// =============================================================================

/// The privileged coordinator process, one per browser session.
pub struct Coordinator<S: SettingsStore> {
    store: S,
    pages: Vec<(PageId, Box<dyn PageEndpoint>)>,
    activity: HashMap<PageId, Instant>,
    next_page: u64,
}

impl<S: SettingsStore> Coordinator<S> {
    /// Create a coordinator over a settings store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            pages: Vec::new(),
            activity: HashMap::new(),
            next_page: 0,
        }
    }

    /// First-install hook: persist the built-in defaults.
    pub fn install(&mut self) {
        if let Err(err) = self.store.save(&Settings::default()) {
            log::warn!("failed to seed default settings: {err}");
        }
    }

    /// Current settings (defaults if the store fails).
    pub fn settings(&self) -> Settings {
        load_or_default(&self.store)
    }

    /// Access the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // -------------------------------------------------------------------------
    // Pages
    // -------------------------------------------------------------------------

    /// Register a page endpoint; returns its handle.
    pub fn register_page(&mut self, endpoint: Box<dyn PageEndpoint>) -> PageId {
        let id = PageId(self.next_page);
        self.next_page += 1;
        self.pages.push((id, endpoint));
        id
    }

    /// Drop a page (tab closed).
    pub fn unregister_page(&mut self, id: PageId) {
        self.pages.retain(|(page, _)| *page != id);
        self.activity.remove(&id);
    }

    /// Record activity for a page and prune long-quiet entries.
    pub fn touch_page(&mut self, id: PageId, now: Instant) {
        self.activity.insert(id, now);
        self.activity
            .retain(|_, last| now.duration_since(*last) <= PAGE_ACTIVITY_TIMEOUT);
    }

    /// Pages currently tracked in the activity map.
    pub fn active_page_count(&self) -> usize {
        self.activity.len()
    }

    /// Probe a page for a live engine. Any response signals presence.
    pub fn probe(&mut self, id: PageId) -> bool {
        let Some((_, endpoint)) = self.pages.iter_mut().find(|(page, _)| *page == id) else {
            return false;
        };
        endpoint.send(&Request::Ping).is_ok()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Global toggle command: flip `enabled`, persist, broadcast.
    ///
    /// Returns the new enabled state.
    pub fn toggle_command(&mut self) -> bool {
        let mut settings = load_or_default(&self.store);
        settings.enabled = !settings.enabled;
        if let Err(err) = self.store.save(&settings) {
            log::warn!("failed to persist toggle: {err}");
        }

        self.broadcast(&Request::Toggle {
            enabled: settings.enabled,
        });
        settings.enabled
    }

    /// Send a request to every page, skipping failures silently.
    ///
    /// Returns the number of pages that acknowledged.
    pub fn broadcast(&mut self, request: &Request) -> usize {
        let mut delivered = 0;
        for (id, endpoint) in &mut self.pages {
            match endpoint.send(request) {
                Ok(_) => delivered += 1,
                Err(err) => {
                    // No live engine in that page; expected and ignored
                    log::debug!("page {id:?} skipped: {err}");
                }
            }
        }
        delivered
    }
}

// =============================================================================
// Tests
// =============================================================================
