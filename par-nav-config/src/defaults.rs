//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on config
//! fields and by the `Default` impls, so a missing key and a fresh config
//! always agree.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Routes ─────────────────────────────────────────────────────────────────

pub fn home_route() -> String {
    "/".to_string()
}

pub fn home_title() -> String {
    "Home".to_string()
}

pub fn home_icon() -> String {
    "home".to_string()
}

pub fn pinned_routes() -> Vec<String> {
    vec![home_route()]
}

// ── Refresh ────────────────────────────────────────────────────────────────

/// Upper bound before a refresh is force-settled.
pub fn refresh_fallback_timeout_ms() -> u64 {
    5000
}

/// Delay between activating a background tab and remounting it.
pub fn refresh_mount_delay_ms() -> u64 {
    50
}

// ── Loading overlay ────────────────────────────────────────────────────────

pub fn overlay_navigation_delay_ms() -> u64 {
    200
}

pub fn overlay_refresh_delay_ms() -> u64 {
    0
}

pub fn overlay_min_visible_ms() -> u64 {
    300
}

// ── Session ────────────────────────────────────────────────────────────────

pub fn session_file_name() -> String {
    "last_session.yaml".to_string()
}
