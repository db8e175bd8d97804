//! File I/O for session persistence
//!
//! Sessions are stored in `~/.config/par-nav/last_session.yaml` unless the
//! config names another file.

use super::SessionState;
use anyhow::{Context, Result};
use par_nav_config::Config;
use std::path::{Path, PathBuf};

/// Get the path to the default session state file
pub fn session_path() -> PathBuf {
    Config::default().session_path()
}

/// Save session state to the default location
pub fn save_session(state: &SessionState) -> Result<()> {
    save_session_to(state, &session_path())
}

/// Save session state to a specific file
pub fn save_session_to(state: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    let contents = serde_yaml_ng::to_string(state).context("Failed to serialize session state")?;

    let temp_path = path.with_extension("yaml.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write session state to {:?}", temp_path))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move session state into {:?}", path))?;

    log::info!(
        "Saved session state ({} tabs) to {:?}",
        state.tabs.len(),
        path
    );
    Ok(())
}

/// Load session state from the default location
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_session() -> Result<Option<SessionState>> {
    load_session_from(&session_path())
}

/// Load session state from a specific file
pub fn load_session_from(path: &Path) -> Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session state from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: SessionState = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse session state from {:?}", path))?;

    log::info!(
        "Loaded session state ({} tabs) from {:?}",
        state.tabs.len(),
        path
    );
    Ok(Some(state))
}

/// Remove the default session state file (e.g., after successful restore)
pub fn clear_session() -> Result<()> {
    clear_session_at(&session_path())
}

/// Remove a specific session state file
pub fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove session state file {:?}", path))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionTab;
    use crate::tab::TabIcon;
    use tempfile::tempdir;

    fn sample_session() -> SessionState {
        SessionState {
            saved_at: "2026-01-01T00:00:00Z".to_string(),
            tabs: vec![
                SessionTab {
                    path: "/".to_string(),
                    title: "Home".to_string(),
                    icon: TabIcon::from("home"),
                },
                SessionTab {
                    path: "/users".to_string(),
                    title: "Users".to_string(),
                    icon: TabIcon::from("user"),
                },
            ],
            active_index: Some(1),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let result = load_session_from(&temp.path().join("nonexistent.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.yaml");
        std::fs::write(&path, "  \n").unwrap();
        assert!(load_session_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.yaml");
        std::fs::write(&path, "tabs: [this is not: valid").unwrap();
        assert!(load_session_from(&path).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("session.yaml");
        let state = sample_session();

        save_session_to(&state, &path).unwrap();
        assert!(!path.with_extension("yaml.tmp").exists());

        let loaded = load_session_from(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_clear_session_at() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        save_session_to(&sample_session(), &path).unwrap();

        clear_session_at(&path).unwrap();
        assert!(!path.exists());
        // clearing a missing file is fine
        clear_session_at(&path).unwrap();
    }
}
