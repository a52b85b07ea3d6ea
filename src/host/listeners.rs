//! Change-listener registry shared by host implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::RouteError;
use crate::host::{ChangeListener, Subscription};

/// Ordered set of change listeners.
///
/// Notification iterates over a snapshot, so listeners may subscribe or
/// unsubscribe while being notified. A listener removed during a
/// notification is not called for the rest of it; one added during a
/// notification is first called on the next.
#[derive(Default)]
pub struct ListenerSet {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, ChangeListener)>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return a subscription that removes it.
    pub fn subscribe(self: &Arc<Self>, listener: ChangeListener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listener mutex poisoned")
            .push((id, listener));

        let set = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(set) = set.upgrade() {
                set.remove(id);
            }
        })
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners
            .lock()
            .expect("listener mutex poisoned")
            .iter()
            .any(|(existing, _)| *existing == id)
    }

    fn remove(&self, id: u64) {
        self.listeners
            .lock()
            .expect("listener mutex poisoned")
            .retain(|(existing, _)| *existing != id);
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().expect("listener mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener in registration order.
    ///
    /// A failing listener does not stop the others; all failures are returned.
    pub fn notify(&self) -> Vec<RouteError> {
        let snapshot: Vec<(u64, ChangeListener)> = self
            .listeners
            .lock()
            .expect("listener mutex poisoned")
            .clone();

        snapshot
            .into_iter()
            .filter(|(id, _)| self.contains(*id))
            .filter_map(|(_, listener)| listener().err())
            .collect()
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use std::sync::atomic::AtomicUsize;

    fn counting(counter: &Arc<AtomicUsize>) -> ChangeListener {
        let counter = counter.clone();
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_notify_and_unsubscribe() {
        let set = Arc::new(ListenerSet::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let sub = set.subscribe(counting(&hits));
        assert_eq!(set.len(), 1);
        assert!(set.notify().is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        assert!(set.is_empty());
        set.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_does_not_stop_later_listeners() {
        let set = Arc::new(ListenerSet::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let _failing = set.subscribe(Arc::new(|| Err(HostError::Detached.into())));
        let _counting = set.subscribe(counting(&hits));

        let errors = set.notify();
        assert_eq!(errors.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let set = Arc::new(ListenerSet::new());
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let s = slot.clone();
        let sub = set.subscribe(Arc::new(move || {
            if let Some(sub) = s.lock().unwrap().take() {
                sub.unsubscribe();
            }
            Ok(())
        }));
        *slot.lock().unwrap() = Some(sub);

        set.notify();
        assert!(set.is_empty());
    }

    #[test]
    fn test_listener_removed_mid_notify_is_skipped() {
        let set = Arc::new(ListenerSet::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let s = slot.clone();
        let _first = set.subscribe(Arc::new(move || {
            if let Some(sub) = s.lock().unwrap().take() {
                sub.unsubscribe();
            }
            Ok(())
        }));
        *slot.lock().unwrap() = Some(set.subscribe(counting(&hits)));

        assert!(set.notify().is_empty());
        assert_eq!(set.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_added_mid_notify_waits_for_next() {
        let set = Arc::new(ListenerSet::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let added: Arc<Mutex<Vec<Subscription>>> = Arc::default();

        let (s, a, h) = (set.clone(), added.clone(), hits.clone());
        let _first = set.subscribe(Arc::new(move || {
            let mut added = a.lock().unwrap();
            if added.is_empty() {
                added.push(s.subscribe(counting(&h)));
            }
            Ok(())
        }));

        set.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        set.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
