//! Ordered tab collection and its lifecycle rules.
//!
//! `TabSet` is the lock-free core of [`super::TabManager`]: plain `&mut self`
//! operations over a `Vec<Tab>` kept in insertion order. Every operation is
//! total; ids that are not present degrade to no-ops.

use super::{Tab, TabIcon, TabId, TabUpdate};

/// Everything a caller needs to pick a new active tab after a close
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRemoval {
    /// The tab that was removed
    pub tab: Tab,
    /// Its position in the sequence before removal
    pub index: usize,
    /// Tab ids in order, before removal
    pub sequence: Vec<TabId>,
    /// Whether the removed tab was the active one
    pub was_active: bool,
}

impl TabRemoval {
    /// Tab to activate in place of the removed one: the tab that followed it,
    /// else the tab that preceded it.
    ///
    /// `None` means the session is empty and the caller should fall back to
    /// its default route.
    pub fn replacement(&self) -> Option<TabId> {
        self.sequence
            .get(self.index + 1)
            .or_else(|| {
                self.index
                    .checked_sub(1)
                    .and_then(|prev| self.sequence.get(prev))
            })
            .copied()
    }
}

pub(crate) struct TabSet {
    /// All open tabs, in order
    tabs: Vec<Tab>,
    /// Currently active tab ID
    active_tab_id: Option<TabId>,
    /// Counter for generating unique tab IDs
    next_tab_id: TabId,
    /// Routes whose tabs are created non-closable
    pinned_routes: Vec<String>,
}

impl TabSet {
    pub(crate) fn new(pinned_routes: Vec<String>) -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            next_tab_id: 1,
            pinned_routes,
        }
    }

    pub(crate) fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub(crate) fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    pub(crate) fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get(id))
    }

    pub(crate) fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub(crate) fn find_by_path(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.path == path)
    }

    pub(crate) fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub(crate) fn is_pinned(&self, path: &str) -> bool {
        self.pinned_routes.iter().any(|p| p == path)
    }

    /// Append a new tab and make it active. The caller guarantees `path` is
    /// not already open.
    pub(crate) fn push(&mut self, path: &str, title: &str, icon: TabIcon) -> Tab {
        let id = self.next_tab_id;
        self.next_tab_id += 1;

        let tab = Tab {
            id,
            title: title.to_string(),
            path: path.to_string(),
            icon,
            closable: !self.is_pinned(path),
        };
        self.tabs.push(tab.clone());

        // Always switch to the new tab
        self.active_tab_id = Some(id);
        tab
    }

    /// Move the active pointer. Returns true if the pointer changed.
    pub(crate) fn set_active(&mut self, id: TabId) -> bool {
        if self.active_tab_id == Some(id) || self.get(id).is_none() {
            return false;
        }
        self.active_tab_id = Some(id);
        true
    }

    /// Shallow-merge `update` into the tab. Returns the updated tab if any
    /// field actually changed.
    pub(crate) fn update(&mut self, id: TabId, update: &TabUpdate) -> Option<Tab> {
        let tab = self.tabs.iter_mut().find(|t| t.id == id)?;
        let mut changed = false;
        if let Some(title) = &update.title
            && tab.title != *title
        {
            tab.title = title.clone();
            changed = true;
        }
        if let Some(icon) = &update.icon
            && tab.icon != *icon
        {
            tab.icon = icon.clone();
            changed = true;
        }
        changed.then(|| tab.clone())
    }

    /// Remove a closable tab.
    ///
    /// If it was active the pointer is cleared; choosing the replacement is
    /// the caller's job (see [`TabRemoval::replacement`]).
    pub(crate) fn remove(&mut self, id: TabId) -> Option<TabRemoval> {
        let index = self.index_of(id)?;
        if !self.tabs[index].closable {
            return None;
        }

        let sequence: Vec<TabId> = self.tabs.iter().map(|t| t.id).collect();
        let tab = self.tabs.remove(index);
        let was_active = self.active_tab_id == Some(id);
        if was_active {
            self.active_tab_id = None;
        }

        Some(TabRemoval {
            tab,
            index,
            sequence,
            was_active,
        })
    }

    /// Close every closable tab except `id`, then activate `id`.
    pub(crate) fn remove_others(&mut self, id: TabId) -> Vec<Tab> {
        if self.get(id).is_none() {
            return Vec::new();
        }
        let removed = self.drain_where(|_, t| t.id != id && t.closable);
        self.active_tab_id = Some(id);
        removed
    }

    /// Close every closable tab positioned after `id`.
    ///
    /// If the active tab was among them, `id` becomes active.
    pub(crate) fn remove_right(&mut self, id: TabId) -> Vec<Tab> {
        let Some(anchor) = self.index_of(id) else {
            return Vec::new();
        };
        let removed = self.drain_where(|idx, t| idx > anchor && t.closable);
        if self.active_tab().is_none() && self.active_tab_id.is_some() {
            self.active_tab_id = Some(id);
        }
        removed
    }

    /// Close every closable tab and clear the active pointer.
    pub(crate) fn remove_all(&mut self) -> Vec<Tab> {
        let removed = self.drain_where(|_, t| t.closable);
        self.active_tab_id = None;
        removed
    }

    /// Remove tabs matching `pred` (given original index and tab) in one pass
    /// over a single snapshot of the list.
    fn drain_where(&mut self, mut pred: impl FnMut(usize, &Tab) -> bool) -> Vec<Tab> {
        let (removed, kept): (Vec<(usize, Tab)>, Vec<(usize, Tab)>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .enumerate()
            .partition(|(idx, t)| pred(*idx, t));
        self.tabs = kept.into_iter().map(|(_, t)| t).collect();
        removed.into_iter().map(|(_, t)| t).collect()
    }
}
