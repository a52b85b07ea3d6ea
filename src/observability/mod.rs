//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (route cycles, create/dispose)
//! host (stack mutations, traversals, driver failures)
//!     → tracing events
//!     → logging.rs (subscriber: EnvFilter + fmt layer)
//!     → stdout (pretty or JSON lines)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber is the embedder's call
//! - The coordinator never logs errors it returns
//! - RUST_LOG overrides the configured level

pub mod logging;

pub use logging::init_logging;
