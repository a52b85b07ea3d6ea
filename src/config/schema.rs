//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// In-memory history settings.
    pub history: HistoryConfig,

    /// Router settings.
    pub router: RouterSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings for [`MemoryHistory`](crate::host::MemoryHistory).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Document origin (e.g., "http://localhost").
    pub origin: String,

    /// Path of the first entry.
    pub initial_path: String,

    /// Maximum entries kept before the oldest is evicted.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost".to_string(),
            initial_path: "/".to_string(),
            max_entries: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouterSettings {
    /// Buffer size of the route event broadcast.
    pub event_capacity: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self { event_capacity: 16 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
