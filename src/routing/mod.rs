//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! push_state / replace_state          host traversal (back, forward, go)
//!     → host push/replace entry           → host change notification
//!     ↘                                   ↙
//!              router.rs route()
//!     → context.rs (parse current location)
//!     → matcher.rs (pathname → params + handler)
//!     → handler(RouteContext) → action
//!     → dispatcher.rs (dispatch action)
//!     → events.rs (publish RouteEvent)
//! ```
//!
//! # Design Decisions
//! - Exactly one route cycle per history event, in event order
//! - Matching and state management stay outside the crate, behind traits
//! - The location is re-read from the host on every cycle, never cached

pub mod context;
pub mod dispatcher;
pub mod events;
pub mod matcher;
pub mod router;

pub use context::{parse_query, Location, Query, QueryValue, RouteContext};
pub use dispatcher::Dispatcher;
pub use events::{RouteEvent, RouteEvents, Trigger};
pub use matcher::{handler_fn, Handler, MatchResult, Matcher};
pub use router::{create_router, Router, RouterBuilder};
