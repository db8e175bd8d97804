//! Boundary to the router and view layer.
//!
//! The core never renders; it asks a [`RouteHost`] to navigate or to rebuild
//! a route's view, and the host reports back through
//! [`crate::navigator::Navigator::view_mounted`].

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Router + view host seen from the navigation core
pub trait RouteHost: Send + Sync {
    /// Resolve and mount `path` through the router
    fn navigate(&self, path: &str);

    /// Re-enter `path` in place: drop its mounted view and build a fresh one
    /// without a full reload. `path` is already the current route; a refresh
    /// of a background tab calls `navigate` first.
    fn remount(&self, path: &str);
}

/// A call received by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", content = "path", rename_all = "snake_case")]
pub enum HostCall {
    Navigate(String),
    Remount(String),
}

/// Host that only records what it was asked to do.
///
/// Backs the `replay` command and the test suites.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn remount_count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::Remount(p) if p == path))
            .count()
    }
}

impl RouteHost for RecordingHost {
    fn navigate(&self, path: &str) {
        self.calls.lock().push(HostCall::Navigate(path.to_string()));
    }

    fn remount(&self, path: &str) {
        self.calls.lock().push(HostCall::Remount(path.to_string()));
    }
}
