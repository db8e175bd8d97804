//! Tab manager for coordinating the open tabs of a session

use super::set::{TabRemoval, TabSet};
use super::{Tab, TabIcon, TabId, TabUpdate};
use crate::observer::{ListenerId, ObserverSet};
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifications emitted by [`TabManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// A new tab was appended
    Opened(Tab),
    /// The active pointer moved to this tab
    Activated(TabId),
    /// Title or icon changed
    Updated(Tab),
    /// Tabs removed by a single close operation
    Closed(Vec<Tab>),
    /// The active pointer was cleared
    Deactivated,
}

/// Manages the open tabs and the active pointer.
///
/// A cheap `Clone` handle; every operation takes the lock once, so bulk
/// closes read and write one consistent snapshot of the list. Listeners are
/// notified after the lock is released.
#[derive(Clone)]
pub struct TabManager {
    inner: Arc<Mutex<TabSet>>,
    observers: Arc<ObserverSet<TabEvent>>,
}

impl TabManager {
    /// Create an empty manager. Tabs for `pinned_routes` are created non-closable.
    pub fn new(pinned_routes: Vec<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TabSet::new(pinned_routes))),
            observers: Arc::new(ObserverSet::new()),
        }
    }

    /// Activate the tab for `path`, or append and activate a new one.
    ///
    /// An existing tab whose title drifted from `title` is corrected.
    pub fn add_or_activate(
        &self,
        path: &str,
        title: &str,
        icon: impl Into<TabIcon>,
    ) -> TabId {
        let icon = icon.into();
        let mut events = Vec::new();
        let id = {
            let mut set = self.inner.lock();
            match set.find_by_path(path).map(|t| t.id) {
                Some(id) => {
                    if let Some(updated) = set.update(id, &TabUpdate::title(title)) {
                        log::debug!("Corrected title of tab {} to {:?}", id, updated.title);
                        events.push(TabEvent::Updated(updated));
                    }
                    if set.set_active(id) {
                        log::debug!("Switched to tab {} ({})", id, path);
                        events.push(TabEvent::Activated(id));
                    }
                    id
                }
                None => {
                    let tab = set.push(path, title, icon);
                    log::info!(
                        "Opened tab {} for {} (total: {})",
                        tab.id,
                        path,
                        set.tabs().len()
                    );
                    let id = tab.id;
                    events.push(TabEvent::Opened(tab));
                    events.push(TabEvent::Activated(id));
                    id
                }
            }
        };
        self.emit(events);
        id
    }

    /// Move the active pointer to `id`. No-op if the tab is not present.
    pub fn set_active(&self, id: TabId) {
        let changed = self.inner.lock().set_active(id);
        if changed {
            log::debug!("Switched to tab {}", id);
            self.observers.notify(&TabEvent::Activated(id));
        }
    }

    /// Shallow-merge title/icon into a tab. No-op if the tab is not present.
    pub fn update_tab(&self, id: TabId, update: TabUpdate) {
        let updated = self.inner.lock().update(id, &update);
        if let Some(tab) = updated {
            self.observers.notify(&TabEvent::Updated(tab));
        }
    }

    /// Close a tab if it is closable.
    ///
    /// When the closed tab was active the pointer is cleared and the returned
    /// [`TabRemoval`] tells the caller which tab should take its place.
    pub fn remove(&self, id: TabId) -> Option<TabRemoval> {
        let removal = self.inner.lock().remove(id);
        match &removal {
            Some(r) => {
                log::info!("Closed tab {} ({}) at index {}", id, r.tab.path, r.index);
                let mut events = vec![TabEvent::Closed(vec![r.tab.clone()])];
                if r.was_active {
                    events.push(TabEvent::Deactivated);
                }
                self.emit(events);
            }
            None => log::debug!("Ignoring close of tab {} (missing or pinned)", id),
        }
        removal
    }

    /// Close every closable tab except `id`, then activate `id`.
    pub fn remove_others(&self, id: TabId) -> Vec<Tab> {
        let (removed, activated) = {
            let mut set = self.inner.lock();
            let before = set.active_tab_id();
            let removed = set.remove_others(id);
            let activated = set.active_tab_id() != before;
            (removed, activated)
        };
        log::info!("Closed {} tabs other than {}", removed.len(), id);
        let mut events = Vec::new();
        if !removed.is_empty() {
            events.push(TabEvent::Closed(removed.clone()));
        }
        if activated {
            events.push(TabEvent::Activated(id));
        }
        self.emit(events);
        removed
    }

    /// Close every closable tab to the right of `id`.
    pub fn remove_right(&self, id: TabId) -> Vec<Tab> {
        let (removed, activated) = {
            let mut set = self.inner.lock();
            let before = set.active_tab_id();
            let removed = set.remove_right(id);
            let after = set.active_tab_id();
            (removed, (after != before).then_some(after).flatten())
        };
        log::info!("Closed {} tabs right of {}", removed.len(), id);
        let mut events = Vec::new();
        if !removed.is_empty() {
            events.push(TabEvent::Closed(removed.clone()));
        }
        if let Some(active) = activated {
            events.push(TabEvent::Activated(active));
        }
        self.emit(events);
        removed
    }

    /// Close every closable tab and clear the active pointer. Pinned tabs survive.
    pub fn remove_all(&self) -> Vec<Tab> {
        let (removed, had_active) = {
            let mut set = self.inner.lock();
            let had_active = set.active_tab_id().is_some();
            (set.remove_all(), had_active)
        };
        log::info!("Closed all {} closable tabs", removed.len());
        let mut events = Vec::new();
        if !removed.is_empty() {
            events.push(TabEvent::Closed(removed.clone()));
        }
        if had_active {
            events.push(TabEvent::Deactivated);
        }
        self.emit(events);
        removed
    }

    /// Reopen a persisted tab list.
    ///
    /// Tabs get fresh ids; paths that are already open are reused instead of
    /// duplicated. `active_index` refers to a position in `tabs`.
    pub fn restore<I>(&self, tabs: I, active_index: Option<usize>)
    where
        I: IntoIterator<Item = (String, String, TabIcon)>,
    {
        let events = {
            let mut set = self.inner.lock();
            let mut events = Vec::new();
            let mut ids = Vec::new();
            for (path, title, icon) in tabs {
                let id = match set.find_by_path(&path) {
                    Some(existing) => existing.id,
                    None => {
                        let tab = set.push(&path, &title, icon);
                        let id = tab.id;
                        events.push(TabEvent::Opened(tab));
                        id
                    }
                };
                ids.push(id);
            }
            if let Some(id) = active_index.and_then(|i| ids.get(i)).copied() {
                set.set_active(id);
            }
            if let Some(active) = set.active_tab_id() {
                events.push(TabEvent::Activated(active));
            }
            log::info!("Restored {} tabs", ids.len());
            events
        };
        self.emit(events);
    }

    /// Snapshot of all tabs, in order
    pub fn tabs(&self) -> Vec<Tab> {
        self.inner.lock().tabs().to_vec()
    }

    /// Tab ids, in order
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.inner.lock().tabs().iter().map(|t| t.id).collect()
    }

    /// Tab paths, in order
    pub fn paths(&self) -> Vec<String> {
        self.inner
            .lock()
            .tabs()
            .iter()
            .map(|t| t.path.clone())
            .collect()
    }

    pub fn tab_count(&self) -> usize {
        self.inner.lock().tabs().len()
    }

    pub fn get(&self, id: TabId) -> Option<Tab> {
        self.inner.lock().get(id).cloned()
    }

    pub fn find_by_path(&self, path: &str) -> Option<Tab> {
        self.inner.lock().find_by_path(path).cloned()
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.inner.lock().index_of(id)
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.inner.lock().active_tab_id()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.inner.lock().active_tab().cloned()
    }

    /// Get index of active tab (0-based)
    pub fn active_tab_index(&self) -> Option<usize> {
        let set = self.inner.lock();
        set.active_tab_id().and_then(|id| set.index_of(id))
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&self, events: Vec<TabEvent>) {
        for event in &events {
            self.observers.notify(event);
        }
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
