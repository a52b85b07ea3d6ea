//! Dispatcher seam.

use crate::error::BoxError;

/// Receives the action produced for each route cycle.
///
/// Dispatch is synchronous from the router's point of view. Anything
/// asynchronous (fetching, thunks) is the dispatcher's business.
pub trait Dispatcher<A>: Send + Sync {
    fn dispatch(&self, action: A) -> Result<(), BoxError>;
}

impl<A, F> Dispatcher<A> for F
where
    F: Fn(A) -> Result<(), BoxError> + Send + Sync,
{
    fn dispatch(&self, action: A) -> Result<(), BoxError> {
        self(action)
    }
}
