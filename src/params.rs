//! Route captures and query-string parameters.
//!
//! - [`RouteParams`]: values captured by `:name` segments of the matched
//!   route pattern (`/talk/:id` on `/talk/42` gives `id = "42"`), plus the
//!   `page` key that terminal routes set.
//! - [`QueryParams`]: the `?key=value&...` part of the URL, parsed by
//!   [`parse_query_params`] and kept beside the route captures, never merged
//!   into them.
//!
//! # Example
//!
//! ```
//! use gpui_talks_shell::{parse_query_params, RouteParams};
//!
//! let mut params = RouteParams::new();
//! params.set("id", "42");
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = parse_query_params("/home?hi=everyone&sort=date");
//! assert_eq!(query.get("hi"), Some("everyone"));
//! ```

use std::collections::HashMap;
use url::form_urlencoded;

/// Parameters captured from path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter parsed as `T`; `None` if missing or unparsable.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// The `page` capture, or `None` when no terminal route set one.
    pub fn page(&self) -> Option<&str> {
        self.get("page")
    }
}

/// Query-string parameters. Each key holds a single value: the last one seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bare query string (no leading `?`).
    ///
    /// Uses `application/x-www-form-urlencoded` decoding: `%XX` escapes are
    /// decoded, `+` is a space, invalid UTF-8 is replaced. Pairs with an
    /// empty key are dropped; a key without `=` maps to `""`. Repeated keys
    /// keep the last value.
    pub fn from_query_string(query: &str) -> Self {
        let params = form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Serialize back into a query string, keys sorted for stable output.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<_> = self.params.iter().collect();
        pairs.sort();

        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Split a URL into its path and raw query string. The fragment is dropped.
///
/// ```
/// use gpui_talks_shell::params::split_url;
///
/// assert_eq!(split_url("/talk/3?ref=home#top"), ("/talk/3", "ref=home"));
/// assert_eq!(split_url("/home"), ("/home", ""));
/// ```
pub fn split_url(url: &str) -> (&str, &str) {
    let without_fragment = url.split_once('#').map_or(url, |(before, _)| before);
    without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""))
}

/// Extract the query parameters of a path-plus-query string.
///
/// Never fails: a URL with no `?` yields an empty map, and malformed pairs
/// degrade as described on [`QueryParams::from_query_string`].
pub fn parse_query_params(url: &str) -> QueryParams {
    let (_, query) = split_url(url);
    QueryParams::from_query_string(query)
}
