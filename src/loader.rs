//! Lazy page activation.
//!
//! Page UI is not built up front. A [`PageRegistry`] maps each [`PageId`] to
//! a loader that produces the page's [`PageModule`] (its render function).
//! The first navigation to a page starts the loader on the background
//! executor; [`PageActivations`] remembers what has been requested so later
//! navigations are no-ops.
//!
//! ```text
//!   request(page) ──► NotRequested ──► Loading ──► Ready(module)
//!                          ▲              │
//!                          └── Failed ◄───┘   (next request retries)
//! ```
//!
//! Until a page is `Ready` its region renders nothing.

use crate::coordinator::PageProps;
use crate::error::PageLoadError;
use crate::page::PageId;
use crate::{debug_log, trace_log, warn_log};
use gpui::{AnyElement, App, Window};
use std::collections::HashMap;
use std::sync::Arc;

/// Render function of an activated page.
pub type PageRenderFn = dyn Fn(&PageProps, &mut Window, &mut App) -> AnyElement + Send + Sync;

/// Loader producing a page module. Runs on the background executor.
pub type PageLoadFn = dyn Fn() -> Result<PageModule, PageLoadError> + Send + Sync;

/// An activated page.
#[derive(Clone)]
pub struct PageModule {
    render: Arc<PageRenderFn>,
}

impl PageModule {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&PageProps, &mut Window, &mut App) -> AnyElement + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    pub fn render(&self, props: &PageProps, window: &mut Window, cx: &mut App) -> AnyElement {
        (self.render)(props, window, cx)
    }
}

impl std::fmt::Debug for PageModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageModule").finish_non_exhaustive()
    }
}

/// Startup-time map from page to loader.
#[derive(Clone, Default)]
pub struct PageRegistry {
    loaders: HashMap<PageId, Arc<PageLoadFn>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader, replacing any previous one for the page.
    pub fn register<F>(&mut self, page: PageId, loader: F)
    where
        F: Fn() -> Result<PageModule, PageLoadError> + Send + Sync + 'static,
    {
        self.loaders.insert(page, Arc::new(loader));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, page: PageId, loader: F) -> Self
    where
        F: Fn() -> Result<PageModule, PageLoadError> + Send + Sync + 'static,
    {
        self.register(page, loader);
        self
    }

    /// Register a page whose module is available immediately.
    pub fn with_module(self, page: PageId, module: PageModule) -> Self {
        self.with(page, move || Ok(module.clone()))
    }

    pub fn loader(&self, page: PageId) -> Option<Arc<PageLoadFn>> {
        self.loaders.get(&page).cloned()
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.loaders.contains_key(&page)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.loaders.keys()).finish()
    }
}

/// Activation state of one page.
#[derive(Debug, Clone)]
pub enum Activation {
    Loading,
    Ready(PageModule),
    Failed(PageLoadError),
}

/// What a call to [`PageActivations::request`] decided.
#[derive(Clone)]
pub enum ActivationRequest {
    /// Start this loader now.
    Start(Arc<PageLoadFn>),
    /// A load is already running.
    InFlight,
    /// The page is already active.
    Ready,
    /// No loader is registered for the page.
    Unregistered,
}

impl std::fmt::Debug for ActivationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActivationRequest::Start(_) => "Start",
            ActivationRequest::InFlight => "InFlight",
            ActivationRequest::Ready => "Ready",
            ActivationRequest::Unregistered => "Unregistered",
        })
    }
}

/// Per-page activation bookkeeping.
#[derive(Debug, Default)]
pub struct PageActivations {
    states: HashMap<PageId, Activation>,
}

impl PageActivations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `page` needs a load. Marks it `Loading` when it does.
    pub fn request(&mut self, page: PageId, registry: &PageRegistry) -> ActivationRequest {
        match self.states.get(&page) {
            Some(Activation::Ready(_)) => return ActivationRequest::Ready,
            Some(Activation::Loading) => return ActivationRequest::InFlight,
            Some(Activation::Failed(err)) => {
                debug_log!("Retrying activation of '{}' after: {}", page, err);
            }
            None => {}
        }

        let Some(loader) = registry.loader(page) else {
            debug_log!("No page module registered for '{}'", page);
            return ActivationRequest::Unregistered;
        };

        trace_log!("Activating page '{}'", page);
        self.states.insert(page, Activation::Loading);
        ActivationRequest::Start(loader)
    }

    /// Record the outcome of a load. Returns the error, if any, for reporting.
    pub fn complete(
        &mut self,
        page: PageId,
        result: Result<PageModule, PageLoadError>,
    ) -> Option<PageLoadError> {
        match result {
            Ok(module) => {
                debug_log!("Page '{}' activated", page);
                self.states.insert(page, Activation::Ready(module));
                None
            }
            Err(err) => {
                warn_log!("Page '{}' failed to activate: {}", page, err);
                self.states.insert(page, Activation::Failed(err.clone()));
                Some(err)
            }
        }
    }

    pub fn state(&self, page: PageId) -> Option<&Activation> {
        self.states.get(&page)
    }

    pub fn module(&self, page: PageId) -> Option<&PageModule> {
        match self.states.get(&page) {
            Some(Activation::Ready(module)) => Some(module),
            _ => None,
        }
    }

    pub fn is_ready(&self, page: PageId) -> bool {
        self.module(page).is_some()
    }
}
