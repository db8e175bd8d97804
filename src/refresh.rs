//! Refresh coordinator: "refresh this tab" without a full reload.
//!
//! A refresh announces a pending transition, drops the route's keep-alive
//! snapshot and asks the host to remount the route in place. A background tab
//! is activated and routed to first, then remounted after a short mount
//! delay. A fallback timer force-settles the refresh if the host never reports
//! the remount as mounted. Settling only ever finishes the refresh's own
//! transition, never one the user started afterwards. Only the most recent refresh is honoured: starting a new one
//! cancels the previous fallback timer and any pending deferred remount.

use crate::host::RouteHost;
use crate::keep_alive::{KeepAliveCache, PageSnapshot};
use crate::tab::{TabId, TabManager};
use crate::transition::{TransitionSource, TransitionTracker};
use par_nav_config::RefreshConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Delays used by [`RefreshCoordinator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTiming {
    /// Force-settle deadline
    pub fallback_timeout: Duration,
    /// Wait between activating a background tab and remounting it
    pub mount_delay: Duration,
}

impl Default for RefreshTiming {
    fn default() -> Self {
        Self::from(&RefreshConfig::default())
    }
}

impl From<&RefreshConfig> for RefreshTiming {
    fn from(config: &RefreshConfig) -> Self {
        Self {
            fallback_timeout: config.fallback_timeout(),
            mount_delay: config.mount_delay(),
        }
    }
}

/// Describes a refresh that was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub tab_id: TabId,
    pub path: String,
    /// The tab was in the background, so the remount is delayed
    pub deferred: bool,
}

struct InFlight {
    generation: u64,
    path: String,
    /// Tracker sequence of the refresh's own transition
    transition: u64,
    /// Set once `remount` has been issued; settle signals before that belong
    /// to the activation mount, not the refresh
    remounted: bool,
    fallback: Option<JoinHandle<()>>,
    deferred: Option<JoinHandle<()>>,
}

impl InFlight {
    fn cancel(self) {
        if let Some(handle) = self.fallback {
            handle.abort();
        }
        if let Some(handle) = self.deferred {
            handle.abort();
        }
    }
}

#[derive(Default)]
struct RefreshState {
    generation: u64,
    inflight: Option<InFlight>,
}

impl RefreshState {
    fn is_current(&self, generation: u64) -> bool {
        self.inflight
            .as_ref()
            .is_some_and(|f| f.generation == generation)
    }
}

/// Composes the tracker, tab manager and keep-alive cache into "refresh a tab"
pub struct RefreshCoordinator<S = PageSnapshot> {
    tracker: TransitionTracker,
    tabs: TabManager,
    cache: KeepAliveCache<S>,
    host: Arc<dyn RouteHost>,
    timing: RefreshTiming,
    runtime: Handle,
    state: Arc<Mutex<RefreshState>>,
}

impl<S> Clone for RefreshCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            tabs: self.tabs.clone(),
            cache: self.cache.clone(),
            host: Arc::clone(&self.host),
            timing: self.timing,
            runtime: self.runtime.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Clone> RefreshCoordinator<S> {
    /// Timers are spawned on `runtime`.
    pub fn new(
        tracker: TransitionTracker,
        tabs: TabManager,
        cache: KeepAliveCache<S>,
        host: Arc<dyn RouteHost>,
        timing: RefreshTiming,
        runtime: Handle,
    ) -> Self {
        Self {
            tracker,
            tabs,
            cache,
            host,
            timing,
            runtime,
            state: Arc::new(Mutex::new(RefreshState::default())),
        }
    }

    pub fn timing(&self) -> RefreshTiming {
        self.timing
    }

    /// Refresh the tab `id`. Returns `None` if no such tab is open.
    pub fn refresh(&self, id: TabId) -> Option<RefreshTicket> {
        let Some(tab) = self.tabs.get(id) else {
            log::debug!("Ignoring refresh of missing tab {}", id);
            return None;
        };
        let path = tab.path.clone();
        let deferred = self.tabs.active_tab_id() != Some(id);

        let transition = self.tracker.start(
            path.clone(),
            format!("Refreshing {}", tab.title),
            TransitionSource::TabRefresh,
        );
        self.cache.clear_page_state(&path);

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            if let Some(previous) = state.inflight.take() {
                log::debug!(
                    "Refresh of {} superseded by refresh of {}",
                    previous.path,
                    path
                );
                previous.cancel();
            }
            let generation = state.generation;
            state.inflight = Some(InFlight {
                generation,
                path: path.clone(),
                transition,
                remounted: !deferred,
                fallback: Some(self.spawn_fallback(generation)),
                deferred: None,
            });
            generation
        };

        log::info!(
            "Refreshing tab {} ({}){}",
            id,
            path,
            if deferred { " after activation" } else { "" }
        );

        if deferred {
            // bring the route on screen; the refreshed view replaces it after the delay
            self.tabs.set_active(id);
            self.host.navigate(&path);
            let handle = self.spawn_deferred_remount(generation, path.clone());
            let mut state = self.state.lock();
            match state.inflight.as_mut() {
                Some(f) if f.generation == generation => f.deferred = Some(handle),
                _ => handle.abort(),
            }
        } else {
            self.host.remount(&path);
        }

        Some(RefreshTicket {
            generation,
            tab_id: id,
            path,
            deferred,
        })
    }

    /// Refresh whichever tab is active
    pub fn refresh_active(&self) -> Option<RefreshTicket> {
        self.tabs.active_tab_id().and_then(|id| self.refresh(id))
    }

    /// Report that the remounted view for `path` finished mounting.
    ///
    /// Ends the refresh if `path` is the latest refresh and its remount has
    /// been issued. The pending transition is only finished if it is still the
    /// one this refresh started; a navigation begun since then stays pending.
    /// Returns whether a transition was finished.
    pub fn settle(&self, path: &str) -> bool {
        let settled = {
            let mut state = self.state.lock();
            let matches = state
                .inflight
                .as_ref()
                .is_some_and(|f| f.path == path && f.remounted);
            if matches { state.inflight.take() } else { None }
        };
        match settled {
            Some(done) => {
                log::debug!("Refresh of {} settled", done.path);
                let transition = done.transition;
                done.cancel();
                self.tracker.finish_seq(transition)
            }
            None => false,
        }
    }

    /// Whether a refresh is waiting to settle
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().inflight.is_some()
    }

    /// Path of the refresh waiting to settle, if any
    pub fn refreshing_path(&self) -> Option<String> {
        self.state.lock().inflight.as_ref().map(|f| f.path.clone())
    }

    fn spawn_fallback(&self, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let tracker = self.tracker.clone();
        let timeout = self.timing.fallback_timeout;

        self.runtime.spawn(async move {
            tokio::time::sleep(timeout).await;

            let expired = {
                let mut state = state.lock();
                if state.is_current(generation) {
                    state.inflight.take()
                } else {
                    None
                }
            };
            if let Some(expired) = expired {
                log::warn!(
                    "Refresh of {} did not settle within {:?}; forcing transition to finish",
                    expired.path,
                    timeout
                );
                if let Some(handle) = expired.deferred {
                    handle.abort();
                }
                tracker.finish_seq(expired.transition);
            }
        })
    }

    fn spawn_deferred_remount(&self, generation: u64, path: String) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let host = Arc::clone(&self.host);
        let delay = self.timing.mount_delay;

        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let current = {
                let mut state = state.lock();
                match state.inflight.as_mut() {
                    Some(f) if f.generation == generation => {
                        f.remounted = true;
                        true
                    }
                    _ => false,
                }
            };
            if current {
                host.remount(&path);
            }
        })
    }
}
