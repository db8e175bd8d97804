//! Loading overlay debounce policy.
//!
//! The transition tracker only says whether a navigation is pending. This
//! consumer decides when a blocking "loading" indicator is worth showing:
//! not before the transition has been pending for a source-specific delay
//! (so fast navigations never flicker), and once shown, for at least a
//! minimum time (so it never blinks).

use crate::transition::{TransitionSource, TransitionState};
use par_nav_config::OverlayConfig;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OverlayPolicy {
    navigation_delay: Duration,
    refresh_delay: Duration,
    min_visible: Duration,
    /// When the current pending stretch began and its latest source
    pending: Option<(Instant, TransitionSource)>,
    shown_at: Option<Instant>,
}

impl OverlayPolicy {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            navigation_delay: Duration::from_millis(config.navigation_delay_ms),
            refresh_delay: Duration::from_millis(config.refresh_delay_ms),
            min_visible: Duration::from_millis(config.min_visible_ms),
            pending: None,
            shown_at: None,
        }
    }

    /// Show delay for a trigger source
    pub fn delay_for(&self, source: TransitionSource) -> Duration {
        match source {
            TransitionSource::TabRefresh => self.refresh_delay,
            _ => self.navigation_delay,
        }
    }

    /// Feed the latest tracker state; returns whether the overlay is visible at `now`.
    ///
    /// A replaced transition keeps the time the pending stretch started.
    pub fn update(&mut self, state: &TransitionState, now: Instant) -> bool {
        match state.pending() {
            Some(pending) => {
                let since = match self.pending {
                    Some((since, _)) => since,
                    None => now,
                };
                self.pending = Some((since, pending.source));

                if self.shown_at.is_none()
                    && now.saturating_duration_since(since) >= self.delay_for(pending.source)
                {
                    self.shown_at = Some(now);
                }
                self.shown_at.is_some()
            }
            None => {
                self.pending = None;
                match self.shown_at {
                    Some(shown) if now.saturating_duration_since(shown) < self.min_visible => true,
                    _ => {
                        self.shown_at = None;
                        false
                    }
                }
            }
        }
    }

    /// Visibility as of the last `update`
    pub fn is_visible(&self) -> bool {
        self.shown_at.is_some()
    }
}

impl Default for OverlayPolicy {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}
