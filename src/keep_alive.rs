//! Keep-alive page cache.
//!
//! Maps a route path to an opaque snapshot supplied by the view that owns the
//! route (scroll offset, form draft, fetched payload references, ...). The
//! cache never inspects, copies or validates a snapshot; whatever the view
//! stored is handed back on `get`. Entries never expire on a timer.
//!
//! By default the cache is unbounded. A bounded cache evicts the least
//! recently used page once `capacity` is exceeded; `get` and `set` both count
//! as a use.

use crate::observer::{ListenerId, ObserverSet};
use lru::LruCache;
use parking_lot::Mutex;
use std::any::Any;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default snapshot type: any shared value the view wants to keep
pub type PageSnapshot = Arc<dyn Any + Send + Sync>;

/// Notifications emitted by [`KeepAliveCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Stored(String),
    Cleared(String),
    /// Dropped to stay within the capacity bound
    Evicted(String),
    ClearedAll(usize),
}

/// Shared per-route snapshot store. Clones refer to the same cache.
pub struct KeepAliveCache<S = PageSnapshot> {
    entries: Arc<Mutex<LruCache<String, S>>>,
    observers: Arc<ObserverSet<CacheEvent>>,
}

impl<S> Clone for KeepAliveCache<S> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            observers: Arc::clone(&self.observers),
        }
    }
}

impl<S: Clone> KeepAliveCache<S> {
    /// Cache without a size bound
    pub fn unbounded() -> Self {
        Self {
            entries: Arc::new(Mutex::new(LruCache::unbounded())),
            observers: Arc::new(ObserverSet::new()),
        }
    }

    /// Cache holding at most `capacity` pages
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            observers: Arc::new(ObserverSet::new()),
        }
    }

    /// Build from an optional bound (`None` or `Some(0)` means unbounded)
    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        match max_entries.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    /// The stored snapshot for `path`, if any
    pub fn get(&self, path: &str) -> Option<S> {
        let hit = self.entries.lock().get(path).cloned();
        log::trace!(
            "Keep-alive {} for {}",
            if hit.is_some() { "hit" } else { "miss" },
            path
        );
        hit
    }

    /// Store `snapshot` for `path`, overwriting any previous entry
    pub fn set(&self, path: impl Into<String>, snapshot: S) {
        let path = path.into();
        let evicted = {
            let mut entries = self.entries.lock();
            match entries.push(path.clone(), snapshot) {
                Some((old_key, _)) if old_key != path => Some(old_key),
                _ => None,
            }
        };
        log::debug!("Stored page state for {}", path);
        self.observers.notify(&CacheEvent::Stored(path));
        if let Some(old) = evicted {
            log::debug!("Evicted page state for {} (capacity reached)", old);
            self.observers.notify(&CacheEvent::Evicted(old));
        }
    }

    /// Drop the entry for exactly one path. Returns whether one existed.
    pub fn clear_page_state(&self, path: &str) -> bool {
        let removed = self.entries.lock().pop(path).is_some();
        if removed {
            log::debug!("Cleared page state for {}", path);
            self.observers.notify(&CacheEvent::Cleared(path.to_string()));
        }
        removed
    }

    /// Drop every entry
    pub fn clear_all(&self) {
        let count = {
            let mut entries = self.entries.lock();
            let count = entries.len();
            entries.clear();
            count
        };
        log::debug!("Cleared all {} cached pages", count);
        self.observers.notify(&CacheEvent::ClearedAll(count));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// `None` for an unbounded cache
    pub fn capacity(&self) -> Option<usize> {
        let cap = self.entries.lock().cap().get();
        (cap != usize::MAX).then_some(cap)
    }

    /// Cached paths, most recently used first
    pub fn paths(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&CacheEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl<S: Clone> Default for KeepAliveCache<S> {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FormDraft {
        scroll: u32,
        name: String,
    }

    #[test]
    fn miss_then_hit() {
        let cache: KeepAliveCache<FormDraft> = KeepAliveCache::unbounded();
        assert_eq!(cache.get("/users"), None);

        let draft = FormDraft {
            scroll: 120,
            name: "ada".to_string(),
        };
        cache.set("/users", draft.clone());
        assert_eq!(cache.get("/users"), Some(draft));
    }

    #[test]
    fn set_overwrites() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::unbounded();
        cache.set("/a", 1);
        cache.set("/a", 2);
        assert_eq!(cache.get("/a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_page_state_touches_one_path() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::unbounded();
        cache.set("/a", 1);
        cache.set("/b", 2);
        assert!(cache.clear_page_state("/a"));
        assert!(!cache.clear_page_state("/a"));
        assert!(!cache.contains("/a"));
        assert_eq!(cache.get("/b"), Some(2));
    }

    #[test]
    fn clear_all_empties() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::unbounded();
        cache.set("/a", 1);
        cache.set("/b", 2);
        cache.clear_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn opaque_snapshot_is_returned_as_is() {
        let cache: KeepAliveCache = KeepAliveCache::unbounded();
        let snapshot: PageSnapshot = Arc::new(vec![1u8, 2, 3]);
        cache.set("/reports", Arc::clone(&snapshot));

        let back = cache.get("/reports").unwrap();
        assert!(Arc::ptr_eq(&back, &snapshot));
        assert_eq!(back.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2, 3]));
    }

    #[test]
    fn bounded_cache_evicts_least_recently_used() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::with_max_entries(Some(2));
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        cache.subscribe(move |e| {
            if let CacheEvent::Evicted(path) = e {
                sink.lock().push(path.clone());
            }
        });

        cache.set("/a", 1);
        cache.set("/b", 2);
        cache.get("/a");
        cache.set("/c", 3);

        assert_eq!(*evicted.lock(), vec!["/b".to_string()]);
        assert_eq!(cache.paths(), vec!["/c".to_string(), "/a".to_string()]);
        assert_eq!(cache.capacity(), Some(2));
    }

    #[test]
    fn overwrite_in_full_cache_does_not_evict() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::with_max_entries(Some(1));
        let evicted = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&evicted);
        cache.subscribe(move |e| {
            if matches!(e, CacheEvent::Evicted(_)) {
                *sink.lock() += 1;
            }
        });

        cache.set("/a", 1);
        cache.set("/a", 2);
        assert_eq!(*evicted.lock(), 0);
        assert_eq!(cache.get("/a"), Some(2));
    }

    #[test]
    fn unbounded_reports_no_capacity() {
        let cache: KeepAliveCache<u32> = KeepAliveCache::with_max_entries(None);
        assert_eq!(cache.capacity(), None);
        let zero: KeepAliveCache<u32> = KeepAliveCache::with_max_entries(Some(0));
        assert_eq!(zero.capacity(), None);
    }
}
