//! Router/view glue end to end: navigation lifecycle, keep-alive hydration
//! and the replacement route chosen when tabs close.

mod common;

use common::{navigator, navigator_with, open};
use par_nav::{Config, HostCall, TransitionSource};

#[tokio::test]
async fn test_navigation_lifecycle() {
    let (nav, host) = navigator();

    nav.navigate("/users", "Users", TransitionSource::Sidebar);
    assert_eq!(nav.tracker().pending_path().as_deref(), Some("/users"));
    assert_eq!(host.drain(), vec![HostCall::Navigate("/users".to_string())]);

    let id = nav.route_settled("/users", "Users", "user");
    assert_eq!(nav.tabs().active_tab_id(), Some(id));
    assert!(nav.tracker().is_pending());

    assert!(nav.view_mounted("/users"));
    assert!(!nav.tracker().is_pending());
}

#[tokio::test]
async fn test_keep_alive_round_trip_between_tabs() {
    let (nav, _host) = navigator();
    open(&nav, "/users", "Users");
    assert_eq!(nav.hydrate("/users"), None);

    nav.view_unmounted("/users", "page=3".to_string());
    open(&nav, "/reports", "Reports");
    assert_eq!(nav.hydrate("/users").as_deref(), Some("page=3"));
}

#[tokio::test]
async fn test_activate_tab_navigates_with_tab_click() {
    let (nav, host) = navigator();
    let users = open(&nav, "/users", "Users");
    open(&nav, "/reports", "Reports");
    host.drain();

    assert!(nav.activate_tab(users));
    assert_eq!(nav.tracker().source(), Some(TransitionSource::TabClick));
    assert_eq!(host.drain(), vec![HostCall::Navigate("/users".to_string())]);

    nav.route_settled("/users", "Users", "page");
    assert!(!nav.activate_tab(users), "already active");
    assert!(!nav.activate_tab(999));
}

#[tokio::test]
async fn test_close_active_routes_to_replacement() {
    let (nav, host) = navigator();
    open(&nav, "/a", "A");
    let b = open(&nav, "/b", "B");
    open(&nav, "/c", "C");
    nav.activate_tab(b);
    nav.route_settled("/b", "B", "page");
    host.drain();

    let removal = nav.close_tab(b).unwrap();
    assert_eq!(removal.tab.path, "/b");
    assert_eq!(host.drain(), vec![HostCall::Navigate("/c".to_string())]);
    assert_eq!(nav.tracker().source(), Some(TransitionSource::Programmatic));
}

#[tokio::test]
async fn test_close_last_tab_goes_home() {
    let (nav, host) = navigator();
    let only = open(&nav, "/only", "Only");
    host.drain();

    nav.close_tab(only);
    assert_eq!(host.drain(), vec![HostCall::Navigate("/".to_string())]);
    assert_eq!(nav.tracker().label().as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_close_inactive_does_not_navigate() {
    let (nav, host) = navigator();
    let a = open(&nav, "/a", "A");
    open(&nav, "/b", "B");
    host.drain();

    nav.close_tab(a);
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_close_drops_cached_state_by_default() {
    let (nav, _host) = navigator();
    let a = open(&nav, "/a", "A");
    nav.view_unmounted("/a", "draft".to_string());
    let b = open(&nav, "/b", "B");
    nav.view_unmounted("/b", "other".to_string());
    open(&nav, "/c", "C");
    nav.view_unmounted("/c", "third".to_string());

    nav.close_tab(a);
    assert!(!nav.cache().contains("/a"));
    nav.close_others(b);
    assert!(nav.cache().contains("/b"));
    assert!(!nav.cache().contains("/c"));
    assert_eq!(nav.tabs().paths(), vec!["/b"]);
}

#[tokio::test]
async fn test_cached_state_survives_close_when_configured() {
    let mut config = Config::default();
    config.keep_alive.clear_on_close = false;
    let (nav, _host) = navigator_with(&config);

    let a = open(&nav, "/a", "A");
    nav.view_unmounted("/a", "draft".to_string());
    open(&nav, "/b", "B");

    nav.close_tab(a);
    assert!(nav.cache().contains("/a"));

    // reopening the route hydrates from the kept state
    open(&nav, "/a", "A");
    assert_eq!(nav.hydrate("/a").as_deref(), Some("draft"));
}

#[tokio::test]
async fn test_close_right_follows_new_active_tab() {
    let (nav, host) = navigator();
    open(&nav, "/", "Home");
    open(&nav, "/users", "Users");
    open(&nav, "/settings", "Settings");
    let home = nav.tabs().find_by_path("/").unwrap().id;
    host.drain();

    let removed = nav.close_right(home);
    assert_eq!(removed.len(), 2);
    assert_eq!(nav.tabs().paths(), vec!["/"]);
    assert_eq!(host.drain(), vec![HostCall::Navigate("/".to_string())]);
}

#[tokio::test]
async fn test_close_others_on_active_tab_does_not_navigate() {
    let (nav, host) = navigator();
    open(&nav, "/a", "A");
    let b = open(&nav, "/b", "B");
    host.drain();

    nav.close_others(b);
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_close_all_clears_cache_and_goes_home() {
    let (nav, host) = navigator();
    open(&nav, "/", "Home");
    open(&nav, "/a", "A");
    nav.view_unmounted("/a", "x".to_string());
    nav.view_unmounted("/", "y".to_string());
    host.drain();

    let removed = nav.close_all();
    assert_eq!(removed.len(), 1);
    assert!(nav.cache().is_empty());
    assert_eq!(nav.tabs().paths(), vec!["/"]);
    assert_eq!(host.drain(), vec![HostCall::Navigate("/".to_string())]);

    nav.route_settled("/", "Home", "home");
    assert!(nav.view_mounted("/"));
}

#[tokio::test]
async fn test_bounded_cache_from_config() {
    let mut config = Config::default();
    config.keep_alive.max_entries = Some(2);
    let (nav, _host) = navigator_with(&config);

    for path in ["/a", "/b", "/c"] {
        nav.view_unmounted(path, path.to_string());
    }
    assert_eq!(nav.cache().capacity(), Some(2));
    assert_eq!(nav.cache().paths(), vec!["/c", "/b"]);
}
