//! Route event notifications.
//!
//! Every successful route cycle is published on a broadcast channel so
//! callers can observe the completion of traversals they requested with
//! `back`, `forward` or `go`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;

/// What started a route cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The cycle run while the router was being built.
    Initial,
    Push,
    Replace,
    /// A host change notification (back, forward, go, user gesture).
    Traversal,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::Initial => "initial",
            Trigger::Push => "push",
            Trigger::Replace => "replace",
            Trigger::Traversal => "traversal",
        };
        f.write_str(name)
    }
}

/// A completed route cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEvent {
    /// 1-based, increasing by one per completed cycle.
    pub seq: u64,
    pub trigger: Trigger,
    /// The location that was dispatched.
    pub location: String,
}

/// Publisher side of the route event stream.
pub struct RouteEvents {
    tx: broadcast::Sender<RouteEvent>,
    seq: AtomicU64,
}

impl RouteEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RouteEvent> {
        self.tx.subscribe()
    }

    /// Record a completed cycle and send it to current subscribers.
    pub fn publish(&self, trigger: Trigger, location: String) -> RouteEvent {
        let event = RouteEvent {
            seq: self.seq.fetch_add(1, Ordering::SeqCst) + 1,
            trigger,
            location,
        };
        // No subscribers is fine.
        let _ = self.tx.send(event.clone());
        event
    }

    /// Number of completed cycles.
    pub fn completed(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for RouteEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEvents")
            .field("completed", &self.completed())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers() {
        let events = RouteEvents::new(4);
        let mut rx = events.subscribe();

        events.publish(Trigger::Initial, "http://localhost/".into());
        events.publish(Trigger::Push, "http://localhost/a".into());

        assert_eq!(rx.try_recv().unwrap().seq, 1);
        let second = rx.try_recv().unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(second.trigger, Trigger::Push);
        assert_eq!(events.completed(), 2);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let events = RouteEvents::new(0);
        let event = events.publish(Trigger::Traversal, "/".into());
        assert_eq!(event.seq, 1);
    }

    #[test]
    fn test_trigger_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Trigger::Traversal).unwrap(),
            serde_json::json!("traversal")
        );
        assert_eq!(Trigger::Replace.to_string(), "replace");
    }
}
