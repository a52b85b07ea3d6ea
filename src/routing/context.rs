//! Location parsing and the per-cycle route context.
//!
//! # Responsibilities
//! - Split a location into pathname, search and hash
//! - Parse the search string into a query map (repeated keys collect)
//! - Build the [`RouteContext`] handed to a matched handler
//!
//! # Design Decisions
//! - Components keep their browser shape: `search` starts with `?`, `hash` with `#`
//! - An empty query or fragment is reported as an empty string
//! - Path-absolute locations are accepted and resolved against a placeholder origin

use std::collections::BTreeMap;

use serde::Serialize;
use url::{form_urlencoded, Url};

const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// A query value: one string, or every value of a repeated key in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    /// The first value for the key.
    pub fn first(&self) -> &str {
        match self {
            QueryValue::Single(value) => value,
            QueryValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Every value for the key.
    pub fn values(&self) -> &[String] {
        match self {
            QueryValue::Single(value) => std::slice::from_ref(value),
            QueryValue::Multiple(values) => values,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = QueryValue::Multiple(vec![first, value]);
            }
            QueryValue::Multiple(values) => values.push(value),
        }
    }
}

/// Parsed query string.
pub type Query = BTreeMap<String, QueryValue>;

/// Parse a search string, with or without its leading `?`.
pub fn parse_query(search: &str) -> Query {
    let raw = search.strip_prefix('?').unwrap_or(search);
    let mut query = Query::new();

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let value = value.into_owned();
        match query.get_mut(&*key) {
            Some(existing) => existing.push(value),
            None => {
                query.insert(key.into_owned(), QueryValue::Single(value));
            }
        }
    }
    query
}

/// The components of a location the router cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Parse an absolute URL or a path-absolute reference.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(PLACEHOLDER_ORIGIN)?;
                base.join(href)?
            }
            Err(e) => return Err(e),
        };

        let search = match url.query() {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        };
        let hash = match url.fragment() {
            Some(f) if !f.is_empty() => format!("#{f}"),
            _ => String::new(),
        };

        Ok(Self {
            pathname: url.path().to_string(),
            search,
            hash,
        })
    }
}

/// Everything a matched handler knows about the current location.
///
/// Built fresh for every route cycle and moved into exactly one handler call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteContext<P> {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    /// Present only when `search` is non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Whatever the matcher returned for `pathname`.
    pub params: P,
}

impl<P> RouteContext<P> {
    pub fn new(location: Location, params: P) -> Self {
        let query = if location.search.is_empty() {
            None
        } else {
            Some(parse_query(&location.search))
        };

        Self {
            pathname: location.pathname,
            search: location.search,
            hash: location.hash,
            query,
            params,
        }
    }

    /// First query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.as_ref()?.get(key).map(QueryValue::first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let loc = Location::parse("http://localhost/users/axdg?tab=posts#top").unwrap();
        assert_eq!(loc.pathname, "/users/axdg");
        assert_eq!(loc.search, "?tab=posts");
        assert_eq!(loc.hash, "#top");
    }

    #[test]
    fn test_parse_path_only() {
        let loc = Location::parse("/users").unwrap();
        assert_eq!(loc.pathname, "/users");
        assert_eq!(loc.search, "");
        assert_eq!(loc.hash, "");
    }

    #[test]
    fn test_empty_query_and_fragment_are_blank() {
        let loc = Location::parse("http://localhost/a?#").unwrap();
        assert_eq!(loc.search, "");
        assert_eq!(loc.hash, "");
    }

    #[test]
    fn test_pathname_keeps_encoding() {
        let loc = Location::parse("http://localhost/caf%C3%A9").unwrap();
        assert_eq!(loc.pathname, "/caf%C3%A9");
    }

    #[test]
    fn test_parse_query_repeated_keys() {
        let query = parse_query("?tag=a&tag=b&tag=c&q=hello+world&empty=");
        assert_eq!(
            query["tag"],
            QueryValue::Multiple(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(query["q"], QueryValue::Single("hello world".into()));
        assert_eq!(query["empty"].first(), "");
        assert_eq!(query["tag"].values().len(), 3);
    }

    #[test]
    fn test_context_query_only_with_search() {
        let without = RouteContext::new(Location::parse("/").unwrap(), ());
        assert!(without.query.is_none());
        assert_eq!(without.query_value("x"), None);

        let with = RouteContext::new(Location::parse("/?x=y").unwrap(), ());
        assert_eq!(with.query_value("x"), Some("y"));
    }

    #[test]
    fn test_context_serializes_without_absent_query() {
        let ctx = RouteContext::new(Location::parse("/users#me").unwrap(), "users");
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pathname": "/users",
                "search": "",
                "hash": "#me",
                "params": "users",
            })
        );
    }
}
