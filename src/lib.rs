//! Client-side navigation coordinator.
//!
//! Binds a URL matcher and a state dispatcher to a session history. Pushes,
//! replaces and host traversals all end in the same route cycle, so the
//! dispatcher sees one action per history event, in order.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use dispatch_router::{create_router, BoxError, HistoryConfig, MatchResult, MemoryHistory, RouteContext};
//!
//! fn matcher(path: &str) -> Result<MatchResult<String, RouteContext<String>>, BoxError> {
//!     Ok(MatchResult::new(path.trim_start_matches('/').to_string(), Ok))
//! }
//!
//! let (history, mut driver) = MemoryHistory::new(&HistoryConfig::default()).unwrap();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let router = create_router(history, matcher, move |ctx: RouteContext<String>| -> Result<(), BoxError> {
//!     sink.lock().unwrap().push(ctx.params);
//!     Ok(())
//! })
//! .unwrap();
//!
//! router.push_state("/users").unwrap();
//! router.back();
//! driver.flush().unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["", "users", ""]);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod observability;
pub mod routing;

pub use config::{HistoryConfig, RouterConfig};
pub use error::{BoxError, HostError, RouteError, RouterError};
pub use host::{HistoryDriver, MemoryHistory, NavigationHost, Subscription};
pub use routing::{
    create_router, MatchResult, Matcher, RouteContext, RouteEvent, Router, RouterBuilder, Trigger,
};
