//! Transition tracker: is the UI currently between two stable views?
//!
//! Two states, [`TransitionState::Idle`] and [`TransitionState::Pending`].
//! `start` always records the new target (replacing any pending one, there is
//! no queue) and `finish` always returns to idle. The tracker carries no
//! debounce policy; overlay consumers decide when to show a loading indicator
//! (see [`crate::overlay`]).

use crate::observer::{ListenerId, ObserverSet};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What triggered a navigation.
///
/// Only used downstream to vary overlay timing; it never changes transition
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSource {
    Sidebar,
    Header,
    TabClick,
    TabRefresh,
    CommandPalette,
    Programmatic,
}

impl TransitionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionSource::Sidebar => "sidebar",
            TransitionSource::Header => "header",
            TransitionSource::TabClick => "tab_click",
            TransitionSource::TabRefresh => "tab_refresh",
            TransitionSource::CommandPalette => "command_palette",
            TransitionSource::Programmatic => "programmatic",
        }
    }
}

impl fmt::Display for TransitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation that has been requested but not yet settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransition {
    /// Route being navigated to
    pub path: String,
    /// Human-readable description of the destination
    pub label: String,
    pub source: TransitionSource,
    /// Per-tracker counter, bumped on every `start`
    pub seq: u64,
}

/// Snapshot of the tracker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Pending(PendingTransition),
}

impl TransitionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransitionState::Pending(_))
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Pending(p) => Some(p),
        }
    }
}

/// Notifications emitted by [`TransitionTracker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// Idle → Pending
    Started(PendingTransition),
    /// Pending → Pending; the previous target was dropped
    Replaced {
        previous: PendingTransition,
        current: PendingTransition,
    },
    /// The pending label was regenerated
    Relabeled(PendingTransition),
    /// Pending → Idle
    Finished(PendingTransition),
}

#[derive(Default)]
struct TrackerInner {
    pending: Option<PendingTransition>,
    next_seq: u64,
}

/// Shared handle to the transition state machine.
///
/// Clones refer to the same tracker.
#[derive(Clone, Default)]
pub struct TransitionTracker {
    inner: Arc<Mutex<TrackerInner>>,
    observers: Arc<ObserverSet<TransitionEvent>>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending transition, replacing any existing one. Always succeeds.
    ///
    /// Returns the sequence number of the new transition (see [`Self::finish_seq`]).
    pub fn start(
        &self,
        path: impl Into<String>,
        label: impl Into<String>,
        source: TransitionSource,
    ) -> u64 {
        let (seq, event) = {
            let mut inner = self.inner.lock();
            inner.next_seq += 1;
            let current = PendingTransition {
                path: path.into(),
                label: label.into(),
                source,
                seq: inner.next_seq,
            };
            let seq = current.seq;
            let event = match inner.pending.replace(current.clone()) {
                Some(previous) => {
                    log::debug!(
                        "Transition to {} replaced by {} ({})",
                        previous.path,
                        current.path,
                        source
                    );
                    TransitionEvent::Replaced { previous, current }
                }
                None => {
                    log::debug!("Transition started: {} ({})", current.path, source);
                    TransitionEvent::Started(current)
                }
            };
            (seq, event)
        };
        self.observers.notify(&event);
        seq
    }

    /// Clear the pending transition. Idempotent.
    pub fn finish(&self) {
        let finished = self.inner.lock().pending.take();
        if let Some(done) = finished {
            log::debug!("Transition finished: {}", done.path);
            self.observers.notify(&TransitionEvent::Finished(done));
        }
    }

    /// Clear the pending transition only if it targets `path`.
    ///
    /// Returns whether anything was cleared. A mount signal for a route the
    /// user already navigated away from must not settle the newer transition.
    pub fn finish_for(&self, path: &str) -> bool {
        let finished = {
            let mut inner = self.inner.lock();
            if inner.pending.as_ref().is_some_and(|p| p.path == path) {
                inner.pending.take()
            } else {
                None
            }
        };
        match finished {
            Some(done) => {
                log::debug!("Transition finished: {}", done.path);
                self.observers.notify(&TransitionEvent::Finished(done));
                true
            }
            None => false,
        }
    }

    /// Clear the pending transition only if it is still the one `start`
    /// returned `seq` for. Returns whether anything was cleared.
    pub fn finish_seq(&self, seq: u64) -> bool {
        let finished = {
            let mut inner = self.inner.lock();
            if inner.pending.as_ref().is_some_and(|p| p.seq == seq) {
                inner.pending.take()
            } else {
                None
            }
        };
        match finished {
            Some(done) => {
                log::debug!("Transition finished: {}", done.path);
                self.observers.notify(&TransitionEvent::Finished(done));
                true
            }
            None => false,
        }
    }

    /// Replace the label of the pending transition. No-op when idle.
    pub fn relabel(&self, label: impl Into<String>) {
        let relabeled = {
            let mut inner = self.inner.lock();
            inner.pending.as_mut().map(|p| {
                p.label = label.into();
                p.clone()
            })
        };
        if let Some(p) = relabeled {
            self.observers.notify(&TransitionEvent::Relabeled(p));
        }
    }

    pub fn state(&self) -> TransitionState {
        match &self.inner.lock().pending {
            Some(p) => TransitionState::Pending(p.clone()),
            None => TransitionState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    pub fn pending_path(&self) -> Option<String> {
        self.inner.lock().pending.as_ref().map(|p| p.path.clone())
    }

    pub fn label(&self) -> Option<String> {
        self.inner.lock().pending.as_ref().map(|p| p.label.clone())
    }

    pub fn source(&self) -> Option<TransitionSource> {
        self.inner.lock().pending.as_ref().map(|p| p.source)
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&TransitionEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let tracker = TransitionTracker::new();
        assert_eq!(tracker.state(), TransitionState::Idle);
        assert_eq!(tracker.pending_path(), None);
    }

    #[test]
    fn start_records_target() {
        let tracker = TransitionTracker::new();
        tracker.start("/users", "Users", TransitionSource::Sidebar);

        let state = tracker.state();
        let pending = state.pending().unwrap();
        assert_eq!(pending.path, "/users");
        assert_eq!(pending.label, "Users");
        assert_eq!(pending.source, TransitionSource::Sidebar);
        assert_eq!(pending.seq, 1);
    }

    #[test]
    fn seq_increases_across_starts() {
        let tracker = TransitionTracker::new();
        tracker.start("/a", "A", TransitionSource::Sidebar);
        tracker.finish();
        tracker.start("/b", "B", TransitionSource::Header);
        assert_eq!(tracker.state().pending().map(|p| p.seq), Some(2));
    }

    #[test]
    fn finish_for_ignores_other_paths() {
        let tracker = TransitionTracker::new();
        tracker.start("/b", "B", TransitionSource::Sidebar);
        assert!(!tracker.finish_for("/a"));
        assert_eq!(tracker.pending_path().as_deref(), Some("/b"));
        assert!(tracker.finish_for("/b"));
        assert!(!tracker.is_pending());
        assert!(!tracker.finish_for("/b"));
    }

    #[test]
    fn finish_seq_only_clears_its_own_transition() {
        let tracker = TransitionTracker::new();
        let first = tracker.start("/users", "Refreshing Users", TransitionSource::TabRefresh);
        let second = tracker.start("/users", "Users", TransitionSource::Sidebar);
        assert_ne!(first, second);

        // same path, but a newer transition
        assert!(!tracker.finish_seq(first));
        assert!(tracker.is_pending());
        assert!(tracker.finish_seq(second));
        assert!(!tracker.finish_seq(second));
    }

    #[test]
    fn relabel_when_idle_is_noop() {
        let tracker = TransitionTracker::new();
        tracker.relabel("ignored");
        assert_eq!(tracker.label(), None);

        tracker.start("/a", "A", TransitionSource::Programmatic);
        tracker.relabel("Refreshing A");
        assert_eq!(tracker.label().as_deref(), Some("Refreshing A"));
        assert_eq!(tracker.source(), Some(TransitionSource::Programmatic));
    }

    #[test]
    fn source_serializes_snake_case() {
        let yaml = serde_yaml_ng::to_string(&TransitionSource::CommandPalette).unwrap();
        assert_eq!(yaml.trim(), "command_palette");
        assert_eq!(TransitionSource::TabRefresh.to_string(), "tab_refresh");
    }
}
