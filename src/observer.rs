//! Synchronous publish/subscribe used by every store.
//!
//! Views register listeners on a store; mutating operations call
//! [`ObserverSet::notify`] after releasing the store's own lock, so a listener
//! may read the store back without deadlocking. Listeners run in registration
//! order within the same event-loop turn as the mutation.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Registered listeners for events of type `E`
pub struct ObserverSet<E> {
    listeners: Mutex<Vec<(ListenerId, Listener<E>)>>,
    next_id: AtomicU64,
}

impl<E> ObserverSet<E> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener; it receives every event notified after this call
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Deliver `event` to every listener.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe from inside a callback; such changes apply to the next event.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

impl<E> Default for ObserverSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_run_in_registration_order() {
        let set: ObserverSet<u32> = ObserverSet::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let a = Arc::clone(&seen);
        set.subscribe(move |e| a.lock().push(("a", *e)));
        let b = Arc::clone(&seen);
        set.subscribe(move |e| b.lock().push(("b", *e)));

        set.notify(&7);
        assert_eq!(*seen.lock(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let set: ObserverSet<u32> = ObserverSet::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let id = set.subscribe(move |_| {
            c.fetch_add(1, Ordering::Relaxed);
        });

        set.notify(&1);
        assert!(set.unsubscribe(id));
        assert!(!set.unsubscribe(id));
        set.notify(&2);

        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert_eq!(set.listener_count(), 0);
    }

    #[test]
    fn listener_can_subscribe_during_notify() {
        let set: Arc<ObserverSet<u32>> = Arc::new(ObserverSet::new());
        let inner = Arc::clone(&set);
        set.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        set.notify(&1);
        assert_eq!(set.listener_count(), 2);
    }
}
