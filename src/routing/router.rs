//! Navigation coordinator.
//!
//! # Responsibilities
//! - Validate the host and collaborators at construction
//! - Funnel push, replace and host traversals through one route cycle
//! - Delegate back, forward and go to the host untouched
//!
//! # Design Decisions
//! - The initial location is dispatched before `build` returns
//! - Push, replace and the initial route run as one host turn, so a
//!   traversal on another thread cannot move the entry before it is read
//! - The turn is reentrant, so dispatchers may push or replace again
//! - Failures propagate to whoever triggered the cycle; nothing is retried
//! - The change listener holds a weak reference; dropping the last handle unsubscribes

use std::fmt;
use std::sync::{Arc, Weak};

use tokio::sync::broadcast;

use crate::config::schema::RouterSettings;
use crate::error::{RouteError, RouterError};
use crate::host::{ChangeListener, NavigationHost, Subscription};
use crate::routing::context::{Location, RouteContext};
use crate::routing::dispatcher::Dispatcher;
use crate::routing::events::{RouteEvent, RouteEvents, Trigger};
use crate::routing::matcher::{MatchResult, Matcher};

struct Inner<P, A> {
    host: Arc<dyn NavigationHost>,
    matcher: Arc<dyn Matcher<P, A>>,
    dispatcher: Arc<dyn Dispatcher<A>>,
    events: RouteEvents,
    subscription: Subscription,
}

impl<P, A> Inner<P, A> {
    /// One route cycle: read, parse, match, transform, dispatch.
    fn route(&self, trigger: Trigger) -> Result<(), RouteError> {
        let href = self.host.current_location();
        let location = Location::parse(&href).map_err(|source| RouteError::Location {
            location: href.clone(),
            source,
        })?;

        let MatchResult { params, handler } = self
            .matcher
            .matches(&location.pathname)
            .map_err(RouteError::Match)?;

        let pathname = location.pathname.clone();
        let action = handler(RouteContext::new(location, params)).map_err(RouteError::Handler)?;
        self.dispatcher
            .dispatch(action)
            .map_err(RouteError::Dispatch)?;

        let event = self.events.publish(trigger, href);
        tracing::debug!(%trigger, pathname = %pathname, seq = event.seq, "route dispatched");
        Ok(())
    }

    /// Run `f` inside one host navigation turn.
    fn in_turn(&self, mut f: impl FnMut() -> Result<(), RouteError>) -> Result<(), RouteError> {
        let mut result = Ok(());
        self.host.with_turn(&mut || result = f());
        result
    }
}

/// Handle returned by [`create_router`] and [`RouterBuilder::build`].
///
/// Clones share the same listener and event stream.
pub struct Router<P, A> {
    inner: Arc<Inner<P, A>>,
}

impl<P, A> Clone for Router<P, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Build a router from a host, a matcher and a dispatcher.
pub fn create_router<P, A, M, D>(
    host: Arc<dyn NavigationHost>,
    matcher: M,
    dispatcher: D,
) -> Result<Router<P, A>, RouterError>
where
    P: 'static,
    A: 'static,
    M: Matcher<P, A> + 'static,
    D: Dispatcher<A> + 'static,
{
    Router::builder(host)
        .matcher(matcher)
        .dispatcher(dispatcher)
        .build()
}

impl<P: 'static, A: 'static> Router<P, A> {
    pub fn builder(host: Arc<dyn NavigationHost>) -> RouterBuilder<P, A> {
        RouterBuilder {
            host,
            matcher: None,
            dispatcher: None,
            event_capacity: RouterSettings::default().event_capacity,
        }
    }

    /// Push `path` onto the host history, then dispatch it.
    ///
    /// When this returns `Ok`, the dispatcher has seen the new location.
    pub fn push_state(&self, path: &str) -> Result<(), RouteError> {
        self.inner.in_turn(|| {
            self.inner.host.push_entry(path)?;
            self.inner.route(Trigger::Push)
        })
    }

    /// Replace the current history entry with `path`, then dispatch it.
    pub fn replace_state(&self, path: &str) -> Result<(), RouteError> {
        self.inner.in_turn(|| {
            self.inner.host.replace_entry(path)?;
            self.inner.route(Trigger::Replace)
        })
    }

    /// Host traversal; the dispatch happens when the host notifies.
    pub fn forward(&self) {
        self.inner.host.forward()
    }

    /// Host traversal; the dispatch happens when the host notifies.
    pub fn back(&self) {
        self.inner.host.back()
    }

    /// Host traversal; the dispatch happens when the host notifies.
    pub fn go(&self, delta: isize) {
        self.inner.host.go(delta)
    }

    /// Stop reacting to host traversals. Push and replace keep dispatching.
    pub fn dispose(&self) {
        if !self.inner.subscription.is_closed() {
            self.inner.subscription.unsubscribe();
            tracing::info!("router disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.subscription.is_closed()
    }

    /// Receive an event after every completed route cycle.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteEvent> {
        self.inner.events.subscribe()
    }

    /// Number of route cycles completed so far, the initial one included.
    pub fn completed_routes(&self) -> u64 {
        self.inner.events.completed()
    }

    /// The host's live location.
    pub fn current_location(&self) -> String {
        self.inner.host.current_location()
    }

    pub fn host(&self) -> &Arc<dyn NavigationHost> {
        &self.inner.host
    }
}

impl<P, A> fmt::Debug for Router<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("location", &self.inner.host.current_location())
            .field("events", &self.inner.events)
            .field("disposed", &self.inner.subscription.is_closed())
            .finish()
    }
}

/// Step-by-step router construction.
pub struct RouterBuilder<P, A> {
    host: Arc<dyn NavigationHost>,
    matcher: Option<Arc<dyn Matcher<P, A>>>,
    dispatcher: Option<Arc<dyn Dispatcher<A>>>,
    event_capacity: usize,
}

impl<P: 'static, A: 'static> RouterBuilder<P, A> {
    pub fn matcher(mut self, matcher: impl Matcher<P, A> + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    pub fn dispatcher(mut self, dispatcher: impl Dispatcher<A> + 'static) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    /// Buffer size of the route event broadcast.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn settings(self, settings: &RouterSettings) -> Self {
        self.event_capacity(settings.event_capacity)
    }

    /// Validate, subscribe to host traversals and dispatch the current location.
    pub fn build(self) -> Result<Router<P, A>, RouterError> {
        if !self.host.is_navigable() {
            return Err(RouterError::Environment(
                "host has no navigable document or history".to_string(),
            ));
        }
        let matcher = self
            .matcher
            .ok_or(RouterError::InvalidArgument("match must be a function"))?;
        let dispatcher = self
            .dispatcher
            .ok_or(RouterError::InvalidArgument("dispatch must be a function"))?;

        let host = self.host;
        let events = RouteEvents::new(self.event_capacity);
        let inner = Arc::new_cyclic(|weak: &Weak<Inner<P, A>>| {
            let weak = weak.clone();
            let listener: ChangeListener = Arc::new(move || match weak.upgrade() {
                Some(inner) => inner.route(Trigger::Traversal),
                None => Ok(()),
            });

            Inner {
                subscription: host.on_change(listener),
                host,
                matcher,
                dispatcher,
                events,
            }
        });

        tracing::info!(location = %inner.host.current_location(), "router created");

        // On failure `inner` drops here and the listener goes with it.
        inner.in_turn(|| inner.route(Trigger::Initial))?;
        Ok(Router { inner })
    }
}
