//! Session state types for save/restore on startup
//!
//! Only the open tab list is persisted. Keep-alive snapshots are live view
//! state and never leave the process.

pub mod storage;

use crate::tab::{TabIcon, TabManager};
use serde::{Deserialize, Serialize};

/// Tab strip at the time of save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Timestamp when the session was saved (RFC 3339)
    pub saved_at: String,
    /// Open tabs in strip order
    pub tabs: Vec<SessionTab>,
    /// Index of the active tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_index: Option<usize>,
}

/// A single tab in a saved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTab {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub icon: TabIcon,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Capture the current tab strip
pub fn capture(tabs: &TabManager) -> SessionState {
    let snapshot = tabs.tabs();
    let active_index = tabs.active_tab_index();
    SessionState {
        saved_at: chrono::Utc::now().to_rfc3339(),
        tabs: snapshot
            .into_iter()
            .map(|tab| SessionTab {
                path: tab.path,
                title: tab.title,
                icon: tab.icon,
            })
            .collect(),
        active_index,
    }
}

/// Reopen the tabs of `state`. Paths already open are kept as they are.
pub fn restore(tabs: &TabManager, state: &SessionState) {
    log::info!(
        "Restoring session saved at {} ({} tabs)",
        state.saved_at,
        state.tabs.len()
    );
    tabs.restore(
        state
            .tabs
            .iter()
            .map(|t| (t.path.clone(), t.title.clone(), t.icon.clone())),
        state.active_index,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_restore_into_fresh_manager() {
        let source = TabManager::new(vec!["/".to_string()]);
        source.add_or_activate("/", "Home", "home");
        source.add_or_activate("/users", "Users", "user");
        source.add_or_activate("/reports", "Reports", "chart");
        source.add_or_activate("/users", "Users", "user");

        let state = capture(&source);
        assert_eq!(state.tabs.len(), 3);
        assert_eq!(state.active_index, Some(1));
        assert!(chrono::DateTime::parse_from_rfc3339(&state.saved_at).is_ok());

        let target = TabManager::new(vec!["/".to_string()]);
        restore(&target, &state);
        assert_eq!(target.paths(), source.paths());
        assert_eq!(target.active_tab().map(|t| t.path), Some("/users".to_string()));
        assert!(!target.tabs()[0].closable);
    }

    #[test]
    fn restore_keeps_already_open_paths() {
        let target = TabManager::new(vec!["/".to_string()]);
        let home = target.add_or_activate("/", "Home", "home");
        let state = SessionState {
            saved_at: "2026-01-01T00:00:00Z".to_string(),
            tabs: vec![
                SessionTab {
                    path: "/".to_string(),
                    title: "Home".to_string(),
                    icon: TabIcon::from("home"),
                },
                SessionTab {
                    path: "/audit".to_string(),
                    title: "Audit".to_string(),
                    icon: TabIcon::from("list"),
                },
            ],
            active_index: None,
        };
        restore(&target, &state);
        assert_eq!(target.tab_count(), 2);
        assert_eq!(target.find_by_path("/").map(|t| t.id), Some(home));
        assert_eq!(target.active_tab_id(), Some(home));
    }
}
