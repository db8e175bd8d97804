//! Section types nested inside [`crate::Config`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Log level for debug logging to file.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Keep-alive page cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepAliveConfig {
    /// Maximum number of cached page snapshots.
    ///
    /// `None` keeps every entry until it is explicitly cleared. Long-lived
    /// sessions should set a bound; the least recently used page is evicted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,

    /// Drop a page's snapshot when its tab is closed.
    #[serde(default = "crate::defaults::bool_true")]
    pub clear_on_close: bool,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            clear_on_close: crate::defaults::bool_true(),
        }
    }
}

/// Timing used by the refresh coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Force-settle a refresh whose remount never reports completion.
    #[serde(default = "crate::defaults::refresh_fallback_timeout_ms")]
    pub fallback_timeout_ms: u64,

    /// Delay before remounting a tab that had to be activated first.
    #[serde(default = "crate::defaults::refresh_mount_delay_ms")]
    pub mount_delay_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            fallback_timeout_ms: crate::defaults::refresh_fallback_timeout_ms(),
            mount_delay_ms: crate::defaults::refresh_mount_delay_ms(),
        }
    }
}

impl RefreshConfig {
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }
}

/// Loading overlay debounce policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// How long a navigation must be pending before the overlay shows.
    #[serde(default = "crate::defaults::overlay_navigation_delay_ms")]
    pub navigation_delay_ms: u64,

    /// Show delay for tab refreshes (usually zero, a refresh is user-visible).
    #[serde(default = "crate::defaults::overlay_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// Once shown, keep the overlay up at least this long.
    #[serde(default = "crate::defaults::overlay_min_visible_ms")]
    pub min_visible_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            navigation_delay_ms: crate::defaults::overlay_navigation_delay_ms(),
            refresh_delay_ms: crate::defaults::overlay_refresh_delay_ms(),
            min_visible_ms: crate::defaults::overlay_min_visible_ms(),
        }
    }
}

/// Tab-list persistence across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Save the open tabs on exit and reopen them on the next start.
    #[serde(default = "crate::defaults::bool_false")]
    pub restore_tabs: bool,

    /// File name of the session state, relative to the config directory.
    #[serde(default = "crate::defaults::session_file_name")]
    pub file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restore_tabs: crate::defaults::bool_false(),
            file_name: crate::defaults::session_file_name(),
        }
    }
}
