//! Route handlers: middleware and terminal routes share one trait.
//!
//! Every entry in the [`Router`](crate::Router) table pairs a
//! [`RoutePattern`](crate::RoutePattern) with a [`RouteHandler`]. When the
//! pattern matches, the handler receives the in-progress [`RouteRequest`] and
//! answers with a [`Flow`]:
//!
//! - [`Flow::Next`]: middleware behaviour: keep evaluating the table.
//! - [`Flow::Done`]: terminal route: matching stops and the request becomes
//!   the published [`RouteContext`](crate::RouteContext).
//!
//! Handlers run synchronously on the foreground thread and must not keep the
//! request around.
//!
//! # Creating handlers
//!
//! | Approach                  | When to use                              |
//! |---------------------------|------------------------------------------|
//! | Implement [`RouteHandler`]| Named, reusable (e.g. [`QueryParser`])   |
//! | [`handler_fn`]            | One-off closure                          |
//!
//! ```
//! use gpui_talks_shell::{handler_fn, Flow};
//!
//! let talk = handler_fn(|request| {
//!     request.params.set("page", "talk");
//!     Flow::Done
//! });
//! ```

use crate::params::{parse_query_params, QueryParams, RouteParams};

/// Whether the router keeps evaluating after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next matching entry.
    Next,
    /// Stop; this handler terminated the navigation.
    Done,
}

/// Mutable view of a navigation while the route table is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// The URL as requested (path, query and fragment).
    pub url: String,
    /// Path part of the URL.
    pub path: String,
    /// Raw query string, without `?`.
    pub query_string: String,
    /// Captures of the entry currently being evaluated.
    pub params: RouteParams,
    /// Parsed query, attached by [`QueryParser`].
    pub query_params: QueryParams,
}

impl RouteRequest {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let (path, query) = crate::params::split_url(&url);
        let (path, query_string) = (path.to_string(), query.to_string());

        Self {
            url,
            path,
            query_string,
            params: RouteParams::new(),
            query_params: QueryParams::new(),
        }
    }
}

/// A handler attached to a route pattern.
pub trait RouteHandler: Send + Sync + 'static {
    /// Run against a matched request.
    fn handle(&self, request: &mut RouteRequest) -> Flow;

    /// Handler name for logging.
    fn name(&self) -> &'static str {
        "RouteHandler"
    }
}

/// Create a handler from a closure.
pub const fn handler_fn<F>(handler: F) -> FnHandler<F>
where
    F: Fn(&mut RouteRequest) -> Flow + Send + Sync + 'static,
{
    FnHandler { handler }
}

/// Handler created from a closure via [`handler_fn`].
pub struct FnHandler<F> {
    handler: F,
}

impl<F> RouteHandler for FnHandler<F>
where
    F: Fn(&mut RouteRequest) -> Flow + Send + Sync + 'static,
{
    fn handle(&self, request: &mut RouteRequest) -> Flow {
        (self.handler)(request)
    }

    fn name(&self) -> &'static str {
        "FnHandler"
    }
}

/// Middleware that parses the query string and attaches it to the request.
///
/// Registered under `*` ahead of every terminal route.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser;

impl RouteHandler for QueryParser {
    fn handle(&self, request: &mut RouteRequest) -> Flow {
        request.query_params = parse_query_params(&request.url);
        Flow::Next
    }

    fn name(&self) -> &'static str {
        "QueryParser"
    }
}

/// Terminal handler that pins `params.page` to a fixed value.
#[derive(Debug, Clone)]
pub struct FixedPage {
    page: &'static str,
}

impl FixedPage {
    pub const fn new(page: &'static str) -> Self {
        Self { page }
    }
}

impl RouteHandler for FixedPage {
    fn handle(&self, request: &mut RouteRequest) -> Flow {
        request.params.set("page", self.page);
        Flow::Done
    }

    fn name(&self) -> &'static str {
        "FixedPage"
    }
}

/// Terminal handler that accepts the captures unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Captured;

impl RouteHandler for Captured {
    fn handle(&self, _request: &mut RouteRequest) -> Flow {
        Flow::Done
    }

    fn name(&self) -> &'static str {
        "Captured"
    }
}
