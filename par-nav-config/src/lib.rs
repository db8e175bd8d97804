//! Configuration system for the par-nav tab session core.
//!
//! This crate provides configuration loading, saving, and default values
//! for the navigation core. It includes:
//!
//! - The top-level [`Config`] struct and its YAML persistence
//! - Per-concern sections: keep-alive cache, refresh timing, loading overlay,
//!   session persistence
//! - Default value functions used by `#[serde(default = ...)]`
//! - Typed [`ConfigError`] values for callers that want to match on failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{KeepAliveConfig, LogLevel, OverlayConfig, RefreshConfig, SessionConfig};
