//! Error taxonomy.
//!
//! # Layers
//! - `HostError`: a host refused a history mutation
//! - `RouteError`: one route cycle failed (location, host, matcher, handler, dispatcher)
//! - `RouterError`: a router could not be constructed
//!
//! Errors raised by embedder code (matchers, handlers, dispatchers) are kept
//! as the `source()` of the wrapping variant so callers can downcast them.

use thiserror::Error;

/// Boxed error produced by embedder-supplied code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by a navigation host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The path could not be resolved against the current entry.
    #[error("invalid history path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The path resolved to a different origin than the document.
    #[error("path {path:?} leaves origin {origin}")]
    CrossOrigin { path: String, origin: String },

    /// The host has no navigable document.
    #[error("host has no navigable history")]
    Detached,
}

/// Errors raised by a single route cycle.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The host reported a location that cannot be parsed.
    #[error("cannot parse location {location:?}: {source}")]
    Location {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// The host rejected a push or replace.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The matcher failed.
    #[error("match failed: {0}")]
    Match(#[source] BoxError),

    /// The matched handler failed to produce an action.
    #[error("route handler failed: {0}")]
    Handler(#[source] BoxError),

    /// The dispatcher rejected the action.
    #[error("dispatch failed: {0}")]
    Dispatch(#[source] BoxError),
}

/// Errors raised while constructing a router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The host cannot navigate (no document, no history).
    #[error("dispatch-router can only be used in a navigable environment: {0}")]
    Environment(String),

    /// A required collaborator is missing.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The initial route cycle failed.
    #[error("initial route failed: {0}")]
    Route(#[from] RouteError),
}
