//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacities > 0, known log levels)
//! - Check the history origin is a usable http(s) origin
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("history.origin {0:?} is not an absolute http(s) origin")]
    InvalidOrigin(String),

    #[error("history.initial_path {0:?} must start with '/'")]
    InvalidInitialPath(String),

    #[error("history.max_entries must be at least 1")]
    ZeroMaxEntries,

    #[error("router.event_capacity must be at least 1")]
    ZeroEventCapacity,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check every semantic rule and collect all failures.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_origin(&config.history.origin) {
        errors.push(ValidationError::InvalidOrigin(config.history.origin.clone()));
    }
    if !config.history.initial_path.starts_with('/') {
        errors.push(ValidationError::InvalidInitialPath(
            config.history.initial_path.clone(),
        ));
    }
    if config.history.max_entries == 0 {
        errors.push(ValidationError::ZeroMaxEntries);
    }
    if config.router.event_capacity == 0 {
        errors.push(ValidationError::ZeroEventCapacity);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host().is_some()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
        }
        Err(_) => false,
    }
}
