//! Shared integration test helpers for par-nav.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{navigator, open};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use par_nav::{Config, Navigator, RecordingHost, TabId, TabManager, TransitionSource};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Navigator over `String` snapshots with a recording host and default config.
///
/// Must be called from within a tokio runtime (e.g. a `#[tokio::test]`).
pub fn navigator() -> (Navigator<String>, RecordingHost) {
    navigator_with(&Config::default())
}

pub fn navigator_with(config: &Config) -> (Navigator<String>, RecordingHost) {
    let host = RecordingHost::new();
    let nav = Navigator::new(config, Arc::new(host.clone()), Handle::current());
    (nav, host)
}

/// Full route lifecycle: link click, router settle, view mounted.
pub fn open(nav: &Navigator<String>, path: &str, title: &str) -> TabId {
    nav.navigate(path, title, TransitionSource::Sidebar);
    let id = nav.route_settled(path, title, "page");
    nav.view_mounted(path);
    id
}

/// Manager with `/` pinned and tabs opened for `paths` in order.
pub fn manager_with(paths: &[&str]) -> (TabManager, Vec<TabId>) {
    let tabs = TabManager::new(vec!["/".to_string()]);
    let ids = paths
        .iter()
        .map(|p| tabs.add_or_activate(p, &p.trim_start_matches('/').to_uppercase(), "page"))
        .collect();
    (tabs, ids)
}
