// Library exports for the binary, the integration tests and embedding hosts
//
// # Locking
//
// Every shared store (`TabManager`, `TransitionTracker`, `KeepAliveCache`,
// `RefreshCoordinator`) is a cheap `Clone` handle around a
// `parking_lot::Mutex`. Each operation takes its lock once and releases it
// before listeners run, so a listener may call back into any store.
// Timers are tokio tasks; they never hold a store lock across an `.await`.

/// Crate version, for the CLI banner and logs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod host;
pub mod icon;
pub mod keep_alive;
pub mod navigator;
pub mod observer;
pub mod overlay;
pub mod refresh;
pub mod scenario;
pub mod session;
pub mod tab;
pub mod transition;

pub use par_nav_config::Config;

pub use host::{HostCall, RecordingHost, RouteHost};
pub use icon::IconRegistry;
pub use keep_alive::{CacheEvent, KeepAliveCache, PageSnapshot};
pub use navigator::{HomeRoute, Navigator};
pub use observer::{ListenerId, ObserverSet};
pub use overlay::OverlayPolicy;
pub use refresh::{RefreshCoordinator, RefreshTicket, RefreshTiming};
pub use tab::{Tab, TabEvent, TabIcon, TabId, TabManager, TabRemoval, TabUpdate};
pub use transition::{
    PendingTransition, TransitionEvent, TransitionSource, TransitionState, TransitionTracker,
};
