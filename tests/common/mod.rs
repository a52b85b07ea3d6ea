//! Shared fixtures for navigation tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dispatch_router::routing::Dispatcher;
use dispatch_router::{
    BoxError, HistoryConfig, HistoryDriver, MatchResult, MemoryHistory, RouteContext,
};

/// Params produced by [`match_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub d: &'static str,
}

/// The action is the context itself, like a location-change action.
pub type Action = RouteContext<Page>;

fn noop(ctx: Action) -> Result<Action, BoxError> {
    Ok(ctx)
}

/// Fixed route table: `/`, `/users`, `/users/axdg`, everything else not found.
pub fn match_page(path: &str) -> Result<MatchResult<Page, Action>, BoxError> {
    let d = match path {
        "/" => "root",
        "/users" => "users",
        "/users/axdg" => "user axdg",
        _ => "not found",
    };
    Ok(MatchResult::new(Page { d }, noop))
}

/// Like [`match_page`] but fails for `/boom`.
pub fn match_or_fail(path: &str) -> Result<MatchResult<Page, Action>, BoxError> {
    if path == "/boom" {
        return Err(Box::new(Boom));
    }
    match_page(path)
}

#[derive(Debug)]
pub struct Boom;

impl std::fmt::Display for Boom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("boom")
    }
}

impl std::error::Error for Boom {}

/// Records every dispatched action.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Action>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Action {
        self.seen.lock().unwrap().last().cloned().expect("nothing dispatched")
    }

    pub fn all(&self) -> Vec<Action> {
        self.seen.lock().unwrap().clone()
    }

    /// `params.d` of every dispatch, in order.
    pub fn pages(&self) -> Vec<&'static str> {
        self.seen.lock().unwrap().iter().map(|a| a.params.d).collect()
    }
}

impl Dispatcher<Action> for Recorder {
    fn dispatch(&self, action: Action) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(action);
        Ok(())
    }
}

pub fn memory_history() -> (Arc<MemoryHistory>, HistoryDriver) {
    MemoryHistory::new(&HistoryConfig::default()).unwrap()
}
