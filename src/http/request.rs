//! Parrot HTTP request type and query-string parsing.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
        }
    }
}

impl Method {
    /// Map a hyper method onto the parrot enum.
    ///
    /// Returns `None` for methods outside the supported set; the server
    /// treats those as unroutable and answers 404.
    pub fn from_hyper(method: &hyper::Method) -> Option<Self> {
        match *method {
            hyper::Method::GET => Some(Method::Get),
            hyper::Method::POST => Some(Method::Post),
            hyper::Method::PUT => Some(Method::Put),
            hyper::Method::DELETE => Some(Method::Delete),
            hyper::Method::PATCH => Some(Method::Patch),
            hyper::Method::HEAD => Some(Method::Head),
            hyper::Method::OPTIONS => Some(Method::Options),
            _ => None,
        }
    }
}

/// A single query parameter value.
///
/// A key that appears once in the query string collapses to `Scalar`; a
/// repeated key becomes a `Sequence` preserving appearance order. Values
/// stay opaque strings, no type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl QueryValue {
    /// Get the value if this parameter appeared exactly once.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value),
            QueryValue::Sequence(_) => None,
        }
    }

    /// Get the values if this parameter was repeated.
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            QueryValue::Scalar(_) => None,
            QueryValue::Sequence(values) => Some(values),
        }
    }
}

/// Parsed query-string mapping.
///
/// Keys are kept sorted so renderings of the same query string are
/// byte-identical across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMap(BTreeMap<String, QueryValue>);

impl QueryMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a raw query string (the part after `?`).
    ///
    /// Keys and values are percent-decoded and `+` decodes to a space.
    /// Pairs with an empty value (`a=` or a bare `a`) are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut map = BTreeMap::new();

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let value = value.into_owned();
            match map.entry(key.into_owned()) {
                Entry::Vacant(slot) => {
                    slot.insert(QueryValue::Scalar(value));
                }
                Entry::Occupied(mut slot) => {
                    let current = slot.get_mut();
                    match current {
                        QueryValue::Scalar(first) => {
                            let first = std::mem::take(first);
                            *current = QueryValue::Sequence(vec![first, value]);
                        }
                        QueryValue::Sequence(values) => values.push(value),
                    }
                }
            }
        }

        Self(map)
    }

    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Whether the mapping holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.0.iter()
    }
}

impl std::fmt::Display for QueryMap {
    /// Renders the mapping as JSON, e.g. `{"a":["1","2"],"b":"3"}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// A parsed HTTP request as seen by route handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParrotRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Parsed query-string mapping.
    pub query: QueryMap,
    /// HTTP headers.
    pub headers: HashMap<String, String>,
    /// Request body, `None` when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
}

impl ParrotRequest {
    /// Create a new ParrotRequest.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryMap::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Set the query from a raw query string.
    pub fn query(mut self, raw: &str) -> Self {
        self.query = QueryMap::parse(raw);
        self
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get a header value.
    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.body.as_ref().map(|b| serde_json::from_slice(b))
    }
}

impl Default for ParrotRequest {
    fn default() -> Self {
        Self::new(Method::Get, "/")
    }
}
