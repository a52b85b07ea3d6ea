//! Host navigation context.
//!
//! # Data Flow
//! ```text
//! Router
//!     → NavigationHost::push_entry / replace_entry (silent, synchronous)
//!     → NavigationHost::go / forward / back (queued traversal)
//!
//! Later turn (host event loop):
//!     traversal applied
//!     → listeners.rs (notify every ChangeListener)
//!     → Router re-reads current_location()
//! ```
//!
//! # Design Decisions
//! - The host is injected, never reached through ambient globals
//! - Push and replace never notify; only traversals do
//! - Every mutation and the route cycle that follows it run in one host turn
//! - Subscriptions are RAII handles: dropping one unsubscribes
//! - memory.rs is a complete host for tests and headless embedders

pub mod listeners;
pub mod memory;

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{HostError, RouteError};

pub use listeners::ListenerSet;
pub use memory::{HistoryDriver, MemoryHistory};

/// Callback invoked when history changes through a traversal.
pub type ChangeListener = Arc<dyn Fn() -> Result<(), RouteError> + Send + Sync>;

/// Session-history capability consumed by the router.
pub trait NavigationHost: Send + Sync {
    /// Whether a navigable document and history stack exist.
    fn is_navigable(&self) -> bool {
        true
    }

    /// The live location, as an absolute URL or a path-absolute reference.
    fn current_location(&self) -> String;

    /// Add a history entry for `path` without notifying listeners.
    fn push_entry(&self, path: &str) -> Result<(), HostError>;

    /// Replace the current entry with `path` without notifying listeners.
    fn replace_entry(&self, path: &str) -> Result<(), HostError>;

    /// Request a traversal by `delta` entries. Listeners are notified on a later turn.
    fn go(&self, delta: isize);

    /// Request a traversal one entry forward.
    fn forward(&self) {
        self.go(1)
    }

    /// Request a traversal one entry back.
    fn back(&self) {
        self.go(-1)
    }

    /// Run `f` as one navigation turn.
    ///
    /// Hosts shared across threads hold a reentrant lock for the turn, and
    /// take it around each traversal and its notification, so a mutation
    /// and the route cycle that reads it are never interleaved with
    /// another thread's navigation.
    fn with_turn(&self, f: &mut dyn FnMut()) {
        f()
    }

    /// Subscribe to traversal notifications.
    fn on_change(&self, listener: ChangeListener) -> Subscription;
}

/// Handle for a registered change listener.
///
/// The listener is removed by [`Subscription::unsubscribe`] or when the
/// handle is dropped, whichever happens first.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` once when released.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// A subscription with nothing to release.
    pub fn noop() -> Self {
        Self {
            cancel: Mutex::new(None),
        }
    }

    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        let cancel = self
            .cancel
            .lock()
            .expect("subscription mutex poisoned")
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Returns true once the listener has been removed.
    pub fn is_closed(&self) -> bool {
        self.cancel
            .lock()
            .expect("subscription mutex poisoned")
            .is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
