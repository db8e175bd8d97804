//! Tab session management
//!
//! This module provides the open-tab model:
//! - `Tab`: one open route in the session
//! - `TabId`: unique, never-reused identifier for each tab
//! - `TabManager`: shared handle owning the ordered tab list and the active pointer

mod manager;
mod set;

pub use manager::{TabEvent, TabManager};
pub use set::TabRemoval;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a tab
pub type TabId = u64;

/// Symbolic icon reference, resolved to a glyph by the view layer.
///
/// See [`crate::icon::IconRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabIcon(pub String);

impl TabIcon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabIcon {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TabIcon {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TabIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One open route in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: TabId,
    /// Display label (corrected when the resolved route title drifts)
    pub title: String,
    /// Route path; unique among open tabs
    pub path: String,
    pub icon: TabIcon,
    /// Pinned tabs (e.g. the home route) are not closable
    pub closable: bool,
}

/// Partial update applied by [`TabManager::update_tab`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabUpdate {
    pub title: Option<String>,
    pub icon: Option<TabIcon>,
}

impl TabUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            icon: None,
        }
    }

    pub fn icon(icon: impl Into<TabIcon>) -> Self {
        Self {
            title: None,
            icon: Some(icon.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.icon.is_none()
    }
}
