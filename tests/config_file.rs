//! Loading configuration from disk and wiring it into a router.

use std::io::Write;

use dispatch_router::config::{load_config, ConfigError, ValidationError};
use dispatch_router::{create_router, MemoryHistory, Router};

mod common;

use common::{match_page, Action, Page, Recorder};

#[test]
fn test_config_drives_history_and_router() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[history]
origin = "https://app.example"
initial_path = "/users/axdg"
max_entries = 2

[router]
event_capacity = 1

[observability]
log_level = "debug"
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let (history, _driver) = MemoryHistory::new(&config.history).unwrap();
    let recorder = Recorder::new();

    let router = Router::<Page, Action>::builder(history.clone())
        .matcher(match_page)
        .dispatcher(recorder.clone())
        .settings(&config.router)
        .build()
        .unwrap();

    assert_eq!(recorder.last().params.d, "user axdg");
    assert_eq!(router.current_location(), "https://app.example/users/axdg");

    router.push_state("/users").unwrap();
    router.push_state("/").unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn test_invalid_file_reports_every_problem() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[history]\norigin = \"nope\"\ninitial_path = \"users\"").unwrap();

    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(
                errors,
                vec![
                    ValidationError::InvalidOrigin("nope".into()),
                    ValidationError::InvalidInitialPath("users".into()),
                ]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_default_config_builds_router() {
    let config = dispatch_router::RouterConfig::default();
    let (history, _driver) = MemoryHistory::new(&config.history).unwrap();
    let recorder = Recorder::new();
    create_router(history, match_page, recorder.clone()).unwrap();
    assert_eq!(recorder.pages(), ["root"]);
}
