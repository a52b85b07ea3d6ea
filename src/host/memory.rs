//! In-memory session history.
//!
//! # Responsibilities
//! - Hold an ordered stack of entries and a current index
//! - Resolve pushed paths against the current entry, same-origin only
//! - Queue traversals and apply them on a later turn via [`HistoryDriver`]
//!
//! # Design Decisions
//! - Traversal targets are computed when applied, not when requested
//! - Out-of-range traversals are dropped without a notification
//! - The oldest entry is evicted once the stack exceeds `max_entries`
//! - A reentrant turn lock spans each mutation and its notification, so
//!   threads sharing one history see navigation in a single order

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use parking_lot::ReentrantMutex;
use tokio::sync::mpsc;
use url::Url;

use crate::config::schema::HistoryConfig;
use crate::error::{HostError, RouteError};
use crate::host::{ChangeListener, ListenerSet, NavigationHost, Subscription};

const BLANK: &str = "about:blank";

struct Stack {
    entries: Vec<Url>,
    index: usize,
    max_entries: usize,
}

impl Stack {
    fn current(&self) -> Option<&Url> {
        self.entries.get(self.index)
    }

    fn resolve(&self, path: &str) -> Result<Url, HostError> {
        let current = self.current().ok_or(HostError::Detached)?;
        let resolved = current.join(path).map_err(|source| HostError::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        if resolved.origin() != current.origin() {
            return Err(HostError::CrossOrigin {
                path: path.to_string(),
                origin: current.origin().ascii_serialization(),
            });
        }
        Ok(resolved)
    }

    fn evict(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
            self.index = self.index.saturating_sub(excess);
        }
    }
}

/// A session history kept entirely in memory.
pub struct MemoryHistory {
    turn: ReentrantMutex<()>,
    stack: Mutex<Stack>,
    listeners: Arc<ListenerSet>,
    traversals: Option<mpsc::UnboundedSender<isize>>,
    pending: Arc<AtomicUsize>,
}

impl MemoryHistory {
    /// Create a history positioned at `initial_path` under `origin`.
    ///
    /// Returns the host and the driver that delivers its traversals.
    pub fn new(config: &HistoryConfig) -> Result<(Arc<Self>, HistoryDriver), HostError> {
        let origin = Url::parse(&config.origin).map_err(|source| HostError::InvalidPath {
            path: config.origin.clone(),
            source,
        })?;

        let mut stack = Stack {
            entries: vec![origin],
            index: 0,
            max_entries: config.max_entries.max(1),
        };
        let initial = stack.resolve(&config.initial_path)?;
        stack.entries[0] = initial;

        let (tx, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let history = Arc::new(Self {
            turn: ReentrantMutex::new(()),
            stack: Mutex::new(stack),
            listeners: Arc::new(ListenerSet::new()),
            traversals: Some(tx),
            pending: pending.clone(),
        });

        tracing::trace!(location = %history.current_location(), "memory history created");

        let driver = HistoryDriver {
            history: Arc::downgrade(&history),
            rx,
            pending,
        };
        Ok((history, driver))
    }

    /// A context without a document: not navigable, rejects every mutation.
    pub fn detached() -> Arc<Self> {
        Arc::new(Self {
            turn: ReentrantMutex::new(()),
            stack: Mutex::new(Stack {
                entries: Vec::new(),
                index: 0,
                max_entries: 1,
            }),
            listeners: Arc::new(ListenerSet::new()),
            traversals: None,
            pending: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Number of entries on the stack.
    pub fn len(&self) -> usize {
        self.stack.lock().expect("history mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.stack.lock().expect("history mutex poisoned").index
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.stack
            .lock()
            .expect("history mutex poisoned")
            .entries
            .iter()
            .map(|url| url.as_str().to_string())
            .collect()
    }

    /// Traversals requested but not yet applied by the driver.
    pub fn pending_traversals(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Move by `delta` and notify listeners. Returns `Ok(false)` when the
    /// target is outside the stack.
    fn traverse(&self, delta: isize) -> Result<bool, Vec<RouteError>> {
        let _turn = self.turn.lock();
        let moved = {
            let mut stack = self.stack.lock().expect("history mutex poisoned");
            let len = stack.entries.len();
            match stack.index.checked_add_signed(delta).filter(|t| *t < len) {
                Some(target) => {
                    stack.index = target;
                    tracing::trace!(delta, index = target, "traversal applied");
                    true
                }
                None => {
                    tracing::trace!(delta, index = stack.index, "traversal out of range, dropped");
                    false
                }
            }
        };

        if !moved {
            return Ok(false);
        }

        let errors = self.listeners.notify();
        if errors.is_empty() {
            Ok(true)
        } else {
            Err(errors)
        }
    }
}

impl NavigationHost for MemoryHistory {
    fn is_navigable(&self) -> bool {
        self.traversals.is_some()
    }

    fn current_location(&self) -> String {
        self.stack
            .lock()
            .expect("history mutex poisoned")
            .current()
            .map(|url| url.as_str().to_string())
            .unwrap_or_else(|| BLANK.to_string())
    }

    fn push_entry(&self, path: &str) -> Result<(), HostError> {
        let _turn = self.turn.lock();
        let mut stack = self.stack.lock().expect("history mutex poisoned");
        let url = stack.resolve(path)?;

        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(url);
        stack.index = stack.entries.len() - 1;
        stack.evict();

        tracing::trace!(path, index = stack.index, len = stack.entries.len(), "entry pushed");
        Ok(())
    }

    fn replace_entry(&self, path: &str) -> Result<(), HostError> {
        let _turn = self.turn.lock();
        let mut stack = self.stack.lock().expect("history mutex poisoned");
        let url = stack.resolve(path)?;

        let index = stack.index;
        stack.entries[index] = url;

        tracing::trace!(path, index, "entry replaced");
        Ok(())
    }

    fn go(&self, delta: isize) {
        if delta == 0 {
            return;
        }
        if let Some(tx) = &self.traversals {
            self.pending.fetch_add(1, Ordering::SeqCst);
            if tx.send(delta).is_err() {
                // Driver gone: nothing will ever apply this traversal.
                self.pending.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    fn with_turn(&self, f: &mut dyn FnMut()) {
        let _turn = self.turn.lock();
        f();
    }

    fn on_change(&self, listener: ChangeListener) -> Subscription {
        if self.traversals.is_none() {
            return Subscription::noop();
        }
        self.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("location", &self.current_location())
            .field("index", &self.index())
            .field("len", &self.len())
            .field("pending", &self.pending_traversals())
            .finish()
    }
}

/// Event loop for a [`MemoryHistory`].
///
/// Traversals requested through `go`, `back` and `forward` sit in a queue
/// until the driver applies them, which is what makes them asynchronous
/// relative to the caller.
pub struct HistoryDriver {
    history: Weak<MemoryHistory>,
    rx: mpsc::UnboundedReceiver<isize>,
    pending: Arc<AtomicUsize>,
}

impl HistoryDriver {
    /// Apply the next queued traversal.
    ///
    /// Returns `None` when the queue is empty, `Some(Ok(moved))` otherwise,
    /// or the listener failures it produced.
    pub fn step(&mut self) -> Option<Result<bool, Vec<RouteError>>> {
        let delta = self.rx.try_recv().ok()?;
        self.pending.fetch_sub(1, Ordering::SeqCst);
        let history = self.history.upgrade()?;
        Some(history.traverse(delta))
    }

    /// Apply queued traversals until the queue is empty or a listener fails.
    ///
    /// Returns how many traversals changed the location. On failure the
    /// remaining traversals stay queued.
    pub fn flush(&mut self) -> Result<usize, Vec<RouteError>> {
        let mut moved = 0;
        while let Some(outcome) = self.step() {
            if outcome? {
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Apply traversals as they arrive until the history is dropped.
    ///
    /// Listener failures are reported through `tracing`.
    pub async fn run(mut self) {
        while let Some(delta) = self.rx.recv().await {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            let Some(history) = self.history.upgrade() else {
                break;
            };
            if let Err(errors) = history.traverse(delta) {
                for error in errors {
                    tracing::error!(error = %error, delta, "change listener failed");
                }
            }
        }
        tracing::debug!("history driver stopped");
    }
}
