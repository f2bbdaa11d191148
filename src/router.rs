//! The ordered route table and the [`RouteContext`] it produces.
//!
//! The shell's table, built by [`Router::shell_routes`], is:
//!
//! | # | Pattern      | Handler        | Effect                                   |
//! |---|--------------|----------------|------------------------------------------|
//! | 1 | `*`          | [`QueryParser`]| attach query params, continue            |
//! | 2 | `/`          | [`FixedPage`]  | `page = "home"`, stop                    |
//! | 3 | `/talk/:id`  | [`FixedPage`]  | `page = "talk"`, `id` captured, stop     |
//! | 4 | `/:page`     | [`Captured`]   | `page` captured, stop                    |
//!
//! Order matters: `/talk/:id` must come before anything that could swallow
//! two-segment paths, and `*` must come first so every terminal route sees
//! the parsed query.
//!
//! If no terminal route matches (e.g. `/a/b`), the context carries no `page`
//! and the validator turns that into `home`.

use crate::matching::RoutePattern;
use crate::middleware::{Captured, FixedPage, Flow, QueryParser, RouteHandler, RouteRequest};
use crate::params::{QueryParams, RouteParams};
use crate::{debug_log, trace_log};
use std::sync::Arc;

/// Immutable snapshot of one navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    /// Path part of the requested URL.
    pub path: String,
    /// Raw query string, without `?`.
    pub query_string: String,
    /// Captures of the terminal route, including `page`.
    pub params: RouteParams,
    /// Parsed query string.
    pub query_params: QueryParams,
}

impl RouteContext {
    /// The requested page name; empty when no terminal route set one.
    pub fn page(&self) -> &str {
        self.params.page().unwrap_or("")
    }

    /// Path and query, as it would appear in a link.
    pub fn url(&self) -> String {
        if self.query_string.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string)
        }
    }
}

impl From<RouteRequest> for RouteContext {
    fn from(request: RouteRequest) -> Self {
        Self {
            path: request.path,
            query_string: request.query_string,
            params: request.params,
            query_params: request.query_params,
        }
    }
}

struct RouteEntry {
    pattern: RoutePattern,
    handler: Arc<dyn RouteHandler>,
}

/// Ordered table of route patterns and their handlers.
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Arc<RouteEntry>>,
}

impl Router {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four-entry table of the talks shell.
    pub fn shell_routes() -> Self {
        Self::new()
            .route("*", QueryParser)
            .route("/", FixedPage::new("home"))
            .route("/talk/:id", FixedPage::new("talk"))
            .route("/:page", Captured)
    }

    /// Append an entry (builder style).
    pub fn route(mut self, pattern: &str, handler: impl RouteHandler) -> Self {
        self.add_route(pattern, handler);
        self
    }

    /// Append an entry. Entries are evaluated in insertion order.
    pub fn add_route(&mut self, pattern: &str, handler: impl RouteHandler) {
        debug_log!("Registered route '{}' ({})", pattern, handler.name());
        self.routes.push(Arc::new(RouteEntry {
            pattern: RoutePattern::parse(pattern),
            handler: Arc::new(handler),
        }));
    }

    /// Patterns in evaluation order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|entry| entry.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Evaluate the table against `url` and build the resulting context.
    ///
    /// Always returns exactly one fully built context. Each matching entry
    /// sees its own captures in `request.params`; the captures of the last
    /// evaluated terminal entry are what the context keeps. Universal
    /// middleware leaves the params untouched.
    pub fn dispatch(&self, url: &str) -> RouteContext {
        let mut request = RouteRequest::new(url);

        for entry in &self.routes {
            let Some(captures) = entry.pattern.captures(&request.path) else {
                continue;
            };

            if !entry.pattern.is_universal() {
                request.params = captures;
            }

            let flow = entry.handler.handle(&mut request);
            trace_log!(
                "Route '{}' ({}) matched '{}' → {:?}",
                entry.pattern,
                entry.handler.name(),
                request.path,
                flow
            );

            if flow == Flow::Done {
                return request.into();
            }
        }

        debug_log!("No terminal route matched '{}'", request.path);
        request.params = RouteParams::new();
        request.into()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.patterns()).finish()
    }
}
