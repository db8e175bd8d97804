//! Router integration glue.
//!
//! The `Navigator` is what the view layer talks to. It owns one instance of
//! each service and wires them together along the route lifecycle:
//!
//! 1. a sidebar link, header search result, command palette entry or tab click
//!    calls [`Navigator::navigate`] (tracker `start`, then router `navigate`);
//! 2. the router observer calls [`Navigator::route_settled`] (tab
//!    `add_or_activate`);
//! 3. the mounted view calls [`Navigator::view_mounted`] (tracker `finish`, or
//!    settle the refresh that remounted it).
//!
//! Views store their state with [`Navigator::view_unmounted`] and read it back
//! with [`Navigator::hydrate`]. Closing tabs goes through the navigator too so
//! snapshots are dropped and a replacement route is picked when the active tab
//! disappears.

use crate::host::RouteHost;
use crate::keep_alive::{KeepAliveCache, PageSnapshot};
use crate::refresh::{RefreshCoordinator, RefreshTicket, RefreshTiming};
use crate::tab::{Tab, TabIcon, TabId, TabManager, TabRemoval};
use crate::transition::{TransitionSource, TransitionTracker};
use par_nav_config::Config;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Route the session falls back to when no tab is left to activate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRoute {
    pub path: String,
    pub title: String,
    pub icon: TabIcon,
}

impl HomeRoute {
    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.home_route.clone(),
            title: config.home_title.clone(),
            icon: TabIcon::new(config.home_icon.clone()),
        }
    }
}

/// Glue between the router, the views and the session services
pub struct Navigator<S = PageSnapshot> {
    tracker: TransitionTracker,
    tabs: TabManager,
    cache: KeepAliveCache<S>,
    refresher: RefreshCoordinator<S>,
    host: Arc<dyn RouteHost>,
    home: HomeRoute,
    clear_on_close: bool,
}

impl<S: Clone> Navigator<S> {
    /// Build every service from `config`.
    pub fn new(config: &Config, host: Arc<dyn RouteHost>, runtime: Handle) -> Self {
        let cache = KeepAliveCache::with_max_entries(config.keep_alive.max_entries);
        match cache.capacity() {
            Some(cap) => log::info!("Keep-alive cache bounded to {} pages", cap),
            None => log::info!(
                "Keep-alive cache is unbounded; set keep_alive.max_entries for long-lived sessions"
            ),
        }

        Self::from_parts(
            TransitionTracker::new(),
            TabManager::new(config.pinned_routes.clone()),
            cache,
            host,
            RefreshTiming::from(&config.refresh),
            runtime,
            HomeRoute::from_config(config),
            config.keep_alive.clear_on_close,
        )
    }

    /// Assemble from existing services (for callers that share them elsewhere)
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        tracker: TransitionTracker,
        tabs: TabManager,
        cache: KeepAliveCache<S>,
        host: Arc<dyn RouteHost>,
        timing: RefreshTiming,
        runtime: Handle,
        home: HomeRoute,
        clear_on_close: bool,
    ) -> Self {
        let refresher = RefreshCoordinator::new(
            tracker.clone(),
            tabs.clone(),
            cache.clone(),
            Arc::clone(&host),
            timing,
            runtime,
        );
        Self {
            tracker,
            tabs,
            cache,
            refresher,
            host,
            home,
            clear_on_close,
        }
    }

    pub fn tracker(&self) -> &TransitionTracker {
        &self.tracker
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn cache(&self) -> &KeepAliveCache<S> {
        &self.cache
    }

    pub fn refresher(&self) -> &RefreshCoordinator<S> {
        &self.refresher
    }

    pub fn home(&self) -> &HomeRoute {
        &self.home
    }

    /// User- or code-initiated navigation: announce it, then hand it to the router.
    pub fn navigate(&self, path: &str, label: &str, source: TransitionSource) {
        self.tracker.start(path, label, source);
        self.host.navigate(path);
    }

    /// Navigate to the home route
    pub fn navigate_home(&self, source: TransitionSource) {
        let home = self.home.clone();
        self.navigate(&home.path, &home.title, source);
    }

    /// The router resolved `path`; open or activate its tab.
    pub fn route_settled(&self, path: &str, title: &str, icon: impl Into<TabIcon>) -> TabId {
        self.tabs.add_or_activate(path, title, icon)
    }

    /// The view for `path` finished mounting.
    ///
    /// Returns whether a pending transition was settled.
    pub fn view_mounted(&self, path: &str) -> bool {
        if self.refresher.refreshing_path().as_deref() == Some(path) {
            return self.refresher.settle(path);
        }
        self.tracker.finish_for(path)
    }

    /// The view for `path` is unmounting; keep its state for later.
    pub fn view_unmounted(&self, path: &str, snapshot: S) {
        self.cache.set(path, snapshot);
    }

    /// State to hydrate the view for `path` from. `None` means start fresh.
    pub fn hydrate(&self, path: &str) -> Option<S> {
        self.cache.get(path)
    }

    /// Tab click. Returns false if the tab is missing or already active.
    pub fn activate_tab(&self, id: TabId) -> bool {
        let Some(tab) = self.tabs.get(id) else {
            return false;
        };
        if self.tabs.active_tab_id() == Some(id) {
            return false;
        }
        self.navigate(&tab.path, &tab.title, TransitionSource::TabClick);
        true
    }

    /// Close one tab, navigating to its replacement if it was active.
    pub fn close_tab(&self, id: TabId) -> Option<TabRemoval> {
        let removal = self.tabs.remove(id)?;
        if self.clear_on_close {
            self.cache.clear_page_state(&removal.tab.path);
        }
        if removal.was_active {
            match removal.replacement().and_then(|next| self.tabs.get(next)) {
                Some(next) => {
                    self.navigate(&next.path, &next.title, TransitionSource::Programmatic)
                }
                None => self.navigate_home(TransitionSource::Programmatic),
            }
        }
        Some(removal)
    }

    /// Close every closable tab except `id` and show `id`.
    pub fn close_others(&self, id: TabId) -> Vec<Tab> {
        let before = self.tabs.active_tab_id();
        let removed = self.tabs.remove_others(id);
        self.forget(&removed);
        self.follow_active(before);
        removed
    }

    /// Close every closable tab right of `id`.
    pub fn close_right(&self, id: TabId) -> Vec<Tab> {
        let before = self.tabs.active_tab_id();
        let removed = self.tabs.remove_right(id);
        self.forget(&removed);
        self.follow_active(before);
        removed
    }

    /// Close every closable tab, drop all cached pages and go home.
    pub fn close_all(&self) -> Vec<Tab> {
        let removed = self.tabs.remove_all();
        self.cache.clear_all();
        self.navigate_home(TransitionSource::Programmatic);
        removed
    }

    pub fn refresh_tab(&self, id: TabId) -> Option<RefreshTicket> {
        self.refresher.refresh(id)
    }

    pub fn refresh_active(&self) -> Option<RefreshTicket> {
        self.refresher.refresh_active()
    }

    fn forget(&self, removed: &[Tab]) {
        if self.clear_on_close {
            for tab in removed {
                self.cache.clear_page_state(&tab.path);
            }
        }
    }

    /// A bulk close moved the active pointer; route to the newly active tab.
    fn follow_active(&self, before: Option<TabId>) {
        let after = self.tabs.active_tab();
        if after.as_ref().map(|t| t.id) != before
            && let Some(tab) = after
        {
            self.navigate(&tab.path, &tab.title, TransitionSource::Programmatic);
        }
    }
}
