//! Tab session persistence through the file system.

use par_nav::TabManager;
use par_nav::session::storage::{clear_session_at, load_session_from, save_session_to};
use par_nav::session::{capture, restore};
use tempfile::TempDir;

#[test]
fn test_save_and_restore_tab_strip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("last_session.yaml");

    let tabs = TabManager::new(vec!["/".to_string()]);
    tabs.add_or_activate("/", "Home", "home");
    tabs.add_or_activate("/users", "Users", "user");
    tabs.add_or_activate("/settings", "Settings", "gear");
    let users = tabs.find_by_path("/users").unwrap().id;
    tabs.set_active(users);

    save_session_to(&capture(&tabs), &path).unwrap();

    let state = load_session_from(&path).unwrap().unwrap();
    let restored = TabManager::new(vec!["/".to_string()]);
    restore(&restored, &state);

    assert_eq!(restored.paths(), vec!["/", "/users", "/settings"]);
    assert_eq!(restored.active_tab().map(|t| t.title), Some("Users".to_string()));
    assert_eq!(
        restored.find_by_path("/settings").map(|t| t.icon.name().to_string()),
        Some("gear".to_string())
    );
    assert!(!restored.find_by_path("/").unwrap().closable);

    clear_session_at(&path).unwrap();
    assert!(load_session_from(&path).unwrap().is_none());
}

#[test]
fn test_session_file_is_readable_yaml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.yaml");
    let tabs = TabManager::new(Vec::new());
    tabs.add_or_activate("/audit", "Audit", "list");

    save_session_to(&capture(&tabs), &path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("path: /audit"));
    assert!(contents.contains("active_index: 0"));
}

#[test]
fn test_hand_written_session_without_icons_loads() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.yaml");
    std::fs::write(
        &path,
        "saved_at: 2026-03-01T10:00:00Z\ntabs:\n  - path: /users\n    title: Users\n",
    )
    .unwrap();

    let state = load_session_from(&path).unwrap().unwrap();
    assert_eq!(state.tabs[0].icon.name(), "");
    assert_eq!(state.active_index, None);
}
