//! Scripted replay of a navigation session.
//!
//! A scenario is a YAML list of steps that stand in for the router and the
//! views: they call into a [`Navigator`] backed by a [`RecordingHost`] and
//! capture the tab strip after every step. Tab ids are not stable across
//! runs, so steps address tabs by path.
//!
//! ```yaml
//! - navigate: { path: /users, label: Users }
//! - settle: { path: /users, title: Users, icon: user }
//! - mounted: /users
//! - refresh: /users
//! - wait_ms: 60
//! - mounted: /users
//! - close_all
//! ```

use crate::host::{HostCall, RecordingHost};
use crate::navigator::Navigator;
use crate::tab::{Tab, TabId};
use crate::transition::TransitionSource;
use anyhow::{Context, Result};
use par_nav_config::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn default_source() -> TransitionSource {
    TransitionSource::Sidebar
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A link was clicked
    Navigate {
        path: String,
        label: String,
        #[serde(default = "default_source")]
        source: TransitionSource,
    },
    /// The router resolved a route
    Settle {
        path: String,
        title: String,
        #[serde(default)]
        icon: String,
    },
    /// The view for a path finished mounting
    Mounted(String),
    /// The view for a path unmounted with some state
    Unmount { path: String, state: String },
    /// Tab click
    Activate(String),
    Close(String),
    CloseOthers(String),
    CloseRight(String),
    CloseAll,
    Refresh(String),
    RefreshActive,
    WaitMs(u64),
}

/// Load a scenario file
pub fn load_steps(path: &Path) -> Result<Vec<Step>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {:?}", path))?;
    parse_steps(&contents).with_context(|| format!("Failed to parse scenario {:?}", path))
}

pub fn parse_steps(contents: &str) -> Result<Vec<Step>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml_ng::from_str(contents)?)
}

/// Tab as shown in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: TabId,
    pub title: String,
    pub path: String,
    pub icon: String,
    pub closable: bool,
    pub active: bool,
}

/// State after one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub outcome: String,
    pub tabs: Vec<TabView>,
    /// Label of the pending transition, if any
    pub pending: Option<String>,
    pub host_calls: Vec<HostCall>,
}

/// Result of a full replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub tabs: Vec<TabView>,
    /// Keep-alive entries left, most recently used first
    pub cached_paths: Vec<String>,
}

/// Drives a navigator from scripted steps
pub struct Replay {
    navigator: Navigator<String>,
    host: RecordingHost,
}

impl Replay {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &Config) -> Self {
        let host = RecordingHost::new();
        let navigator = Navigator::new(config, Arc::new(host.clone()), Handle::current());
        Self { navigator, host }
    }

    pub fn navigator(&self) -> &Navigator<String> {
        &self.navigator
    }

    pub async fn run(&self, steps: &[Step]) -> ReplayReport {
        let mut reports = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            log::debug!("Replay step {}: {:?}", index, step);
            let outcome = self.apply(step).await;
            reports.push(StepReport {
                index,
                step: step.clone(),
                outcome,
                tabs: self.tab_views(),
                pending: self.navigator.tracker().label(),
                host_calls: self.host.drain(),
            });
        }
        ReplayReport {
            steps: reports,
            tabs: self.tab_views(),
            cached_paths: self.navigator.cache().paths(),
        }
    }

    async fn apply(&self, step: &Step) -> String {
        let nav = &self.navigator;
        match step {
            Step::Navigate {
                path,
                label,
                source,
            } => {
                nav.navigate(path, label, *source);
                format!("navigating to {}", path)
            }
            Step::Settle { path, title, icon } => {
                let id = nav.route_settled(path, title, icon.as_str());
                format!("tab {} active", id)
            }
            Step::Mounted(path) => {
                if nav.view_mounted(path) {
                    "transition settled".to_string()
                } else {
                    "no matching transition".to_string()
                }
            }
            Step::Unmount { path, state } => {
                nav.view_unmounted(path, state.clone());
                format!("cached state for {}", path)
            }
            Step::Activate(path) => match self.tab_id(path) {
                Some(id) if nav.activate_tab(id) => format!("activating tab {}", id),
                Some(_) => "already active".to_string(),
                None => missing(path),
            },
            Step::Close(path) => match self.tab_id(path) {
                Some(id) => match nav.close_tab(id) {
                    Some(removal) => format!("closed {}", removal.tab.path),
                    None => "tab is pinned".to_string(),
                },
                None => missing(path),
            },
            Step::CloseOthers(path) => match self.tab_id(path) {
                Some(id) => closed(&nav.close_others(id)),
                None => missing(path),
            },
            Step::CloseRight(path) => match self.tab_id(path) {
                Some(id) => closed(&nav.close_right(id)),
                None => missing(path),
            },
            Step::CloseAll => closed(&nav.close_all()),
            Step::Refresh(path) => match self.tab_id(path).and_then(|id| nav.refresh_tab(id)) {
                Some(ticket) if ticket.deferred => format!("refresh {} deferred", ticket.generation),
                Some(ticket) => format!("refresh {} started", ticket.generation),
                None => missing(path),
            },
            Step::RefreshActive => match nav.refresh_active() {
                Some(ticket) => format!("refresh {} started", ticket.generation),
                None => "no active tab".to_string(),
            },
            Step::WaitMs(ms) => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
                format!("waited {}ms", ms)
            }
        }
    }

    fn tab_id(&self, path: &str) -> Option<TabId> {
        self.navigator.tabs().find_by_path(path).map(|t| t.id)
    }

    fn tab_views(&self) -> Vec<TabView> {
        let tabs = self.navigator.tabs();
        let active = tabs.active_tab_id();
        tabs.tabs()
            .into_iter()
            .map(|t| TabView {
                active: Some(t.id) == active,
                id: t.id,
                icon: t.icon.0,
                title: t.title,
                path: t.path,
                closable: t.closable,
            })
            .collect()
    }
}

fn missing(path: &str) -> String {
    format!("no tab open at {}", path)
}

fn closed(tabs: &[Tab]) -> String {
    format!("closed {} tabs", tabs.len())
}

/// One-line tab strip, e.g. `[Home] *Users* [Reports x]`
pub fn render_strip(tabs: &[TabView]) -> String {
    tabs.iter()
        .map(|t| {
            let close = if t.closable { " x" } else { "" };
            if t.active {
                format!("*{}{}*", t.title, close)
            } else {
                format!("[{}{}]", t.title, close)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
