//! Matcher seam.
//!
//! A matcher maps a pathname to the params it extracted and the handler that
//! turns a [`RouteContext`] into an action. Pattern syntax and route tables
//! belong to the matcher, not to this crate.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::routing::context::RouteContext;

/// Transform from a route context to a dispatchable action.
pub type Handler<P, A> = Arc<dyn Fn(RouteContext<P>) -> Result<A, BoxError> + Send + Sync>;

/// Wrap a closure as a shareable [`Handler`].
pub fn handler_fn<P, A, F>(f: F) -> Handler<P, A>
where
    F: Fn(RouteContext<P>) -> Result<A, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a matcher found for one pathname.
pub struct MatchResult<P, A> {
    pub params: P,
    pub handler: Handler<P, A>,
}

impl<P, A> MatchResult<P, A> {
    pub fn new<F>(params: P, handler: F) -> Self
    where
        F: Fn(RouteContext<P>) -> Result<A, BoxError> + Send + Sync + 'static,
    {
        Self {
            params,
            handler: Arc::new(handler),
        }
    }

    /// Reuse an existing handler, typically one stored in a route table.
    pub fn with_handler(params: P, handler: Handler<P, A>) -> Self {
        Self { params, handler }
    }
}

impl<P: fmt::Debug, A> fmt::Debug for MatchResult<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Resolves a pathname to a [`MatchResult`].
///
/// Errors are propagated to whoever triggered the route cycle, unchanged.
/// A matcher that should never fail resolves unknown paths to a not-found
/// result instead.
pub trait Matcher<P, A>: Send + Sync {
    fn matches(&self, pathname: &str) -> Result<MatchResult<P, A>, BoxError>;
}

impl<P, A, F> Matcher<P, A> for F
where
    F: Fn(&str) -> Result<MatchResult<P, A>, BoxError> + Send + Sync,
{
    fn matches(&self, pathname: &str) -> Result<MatchResult<P, A>, BoxError> {
        self(pathname)
    }
}
