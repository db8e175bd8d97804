//! Core `Config` struct plus its persistence and validation.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_dir`, `config_path`, `session_path`)
//! - Semantic validation (`validate`)

use crate::error::ConfigError;
use crate::types::{KeepAliveConfig, LogLevel, OverlayConfig, RefreshConfig, SessionConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Top-level configuration for the navigation core.
///
/// Every field carries a serde default so partial YAML files load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Debug log verbosity (overridden by `RUST_LOG` and `--log-level`)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Route the session falls back to when every closable tab is gone
    #[serde(default = "crate::defaults::home_route")]
    pub home_route: String,

    /// Title of the home tab
    #[serde(default = "crate::defaults::home_title")]
    pub home_title: String,

    /// Icon symbol of the home tab
    #[serde(default = "crate::defaults::home_icon")]
    pub home_icon: String,

    /// Routes whose tabs can never be closed
    #[serde(default = "crate::defaults::pinned_routes")]
    pub pinned_routes: Vec<String>,

    #[serde(default)]
    pub keep_alive: KeepAliveConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            home_route: crate::defaults::home_route(),
            home_title: crate::defaults::home_title(),
            home_icon: crate::defaults::home_icon(),
            pinned_routes: crate::defaults::pinned_routes(),
            keep_alive: KeepAliveConfig::default(),
            refresh: RefreshConfig::default(),
            overlay: OverlayConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Config = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to parse config file {:?}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file {:?}", path))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Get the configuration directory (`~/.config/par-nav` on Unix)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-nav")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-nav")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the session state file path
    pub fn session_path(&self) -> PathBuf {
        Self::config_dir().join(&self.session.file_name)
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.home_route.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "home_route '{}' must start with '/'",
                self.home_route
            )));
        }

        if let Some(route) = self.pinned_routes.iter().find(|r| !r.starts_with('/')) {
            return Err(ConfigError::Validation(format!(
                "pinned route '{route}' must start with '/'"
            )));
        }

        if self.keep_alive.max_entries == Some(0) {
            return Err(ConfigError::Validation(
                "keep_alive.max_entries must be at least 1 (omit it for no limit)".to_string(),
            ));
        }

        if self.refresh.fallback_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "refresh.fallback_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.refresh.mount_delay_ms >= self.refresh.fallback_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "refresh.mount_delay_ms ({}) must be shorter than refresh.fallback_timeout_ms ({})",
                self.refresh.mount_delay_ms, self.refresh.fallback_timeout_ms
            )));
        }

        let file_name = Path::new(&self.session.file_name);
        let plain_name = file_name.components().count() == 1
            && matches!(file_name.components().next(), Some(Component::Normal(_)));
        if !plain_name {
            return Err(ConfigError::Validation(format!(
                "session.file_name '{}' must be a plain file name",
                self.session.file_name
            )));
        }

        Ok(())
    }

    /// Whether `path` is one of the pinned routes
    pub fn is_pinned(&self, path: &str) -> bool {
        self.pinned_routes.iter().any(|r| r == path)
    }
}
