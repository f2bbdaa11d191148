//! Shell integration for GPUI.
//!
//! - [`GlobalShell`]: the one coordinator instance, stored as a GPUI
//!   `Global`. It owns the [`AppState`], the route table, the history, the
//!   page activations and the collaborators ([`ShellServices`]).
//! - [`Shell`]: static entry points (`Shell::navigate`, `Shell::emit`, ...)
//!   that update the global through `cx`, start any background work the
//!   transition asked for, and refresh windows.
//!
//! Blocking work (catalogue fetch, favourites I/O, page loads) runs on the
//! background executor. Its result is applied back on the foreground with
//! `update_global`, so every state mutation happens on one timeline.
//!
//! # Initialization
//!
//! ```ignore
//! use gpui_talks_shell::{init_shell, Shell, ShellConfig, ShellServices};
//!
//! let services = ShellServices::from_config(&ShellConfig::default())?
//!     .with_pages(pages::registry());
//! init_shell(cx, services, |_| {});
//! Shell::start(cx);
//! ```

use crate::analytics::{Analytics, LogAnalytics};
use crate::catalogue::{FileTalkSource, HttpTalkSource, TalkRecord, TalkSource};
use crate::config::{CatalogueLocation, ShellConfig};
use crate::coordinator::{AppState, HydrationTicket, PageProps, PersistRequest};
use crate::error::{LoadError, ShellError};
use crate::favourites::{FavouriteId, FavouriteSet};
use crate::history::History;
use crate::loader::{ActivationRequest, PageActivations, PageLoadFn, PageModule, PageRegistry};
use crate::page::PageId;
use crate::router::Router;
use crate::storage::FavouritesStore;
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use gpui::{App, BorrowAppContext, Global};
use std::sync::Arc;

// ============================================================================
// ShellServices
// ============================================================================

/// Collaborators of the shell.
#[derive(Clone)]
pub struct ShellServices {
    source: Arc<dyn TalkSource>,
    store: FavouritesStore,
    analytics: Arc<dyn Analytics>,
    pages: PageRegistry,
    initial_url: String,
}

impl ShellServices {
    /// Services with an in-memory store, log analytics and no pages.
    pub fn new(source: impl TalkSource) -> Self {
        Self {
            source: Arc::new(source),
            store: FavouritesStore::in_memory(),
            analytics: Arc::new(LogAnalytics),
            pages: PageRegistry::new(),
            initial_url: "/".to_string(),
        }
    }

    /// Wire the catalogue source and store described by `config`.
    pub fn from_config(config: &ShellConfig) -> Result<Self, ShellError> {
        let source: Arc<dyn TalkSource> = match config.catalogue_location()? {
            CatalogueLocation::Http(url) => {
                Arc::new(HttpTalkSource::new(url, config.request_timeout())?)
            }
            CatalogueLocation::File(path) => Arc::new(FileTalkSource::new(path)),
        };
        let store = match &config.storage_dir {
            Some(dir) => FavouritesStore::in_dir(dir),
            None => FavouritesStore::in_memory(),
        };
        info_log!(
            "Shell services: catalogue from {}, favourites {}",
            source.describe(),
            config
                .storage_dir
                .as_ref()
                .map_or_else(|| "in memory".to_string(), |dir| dir.display().to_string())
        );

        Ok(Self {
            source,
            store,
            analytics: Arc::new(LogAnalytics),
            pages: PageRegistry::new(),
            initial_url: config.initial_url.clone(),
        })
    }

    pub fn with_source(mut self, source: impl TalkSource) -> Self {
        self.source = Arc::new(source);
        self
    }

    pub fn with_store(mut self, store: FavouritesStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_pages(mut self, pages: PageRegistry) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_initial_url(mut self, url: impl Into<String>) -> Self {
        self.initial_url = url.into();
        self
    }

    pub fn source(&self) -> &Arc<dyn TalkSource> {
        &self.source
    }

    pub fn store(&self) -> &FavouritesStore {
        &self.store
    }

    pub fn analytics(&self) -> &Arc<dyn Analytics> {
        &self.analytics
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn initial_url(&self) -> &str {
        &self.initial_url
    }
}

impl std::fmt::Debug for ShellServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellServices")
            .field("source", &self.source.describe())
            .field("store", &self.store)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ShellEvent
// ============================================================================

/// Signals raised by page UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Favourite(FavouriteId),
    Unfavourite(FavouriteId),
    ToggleDrawer,
}

// ============================================================================
// GlobalShell
// ============================================================================

/// Kind of navigation to perform.
#[derive(Debug, Clone)]
enum NavigateOp {
    /// Route the current history entry again.
    Current,
    Push(String),
    Replace(String),
    Back,
    Forward,
}

/// Background work a transition asked for.
#[derive(Default)]
struct Effects {
    activation: Option<(PageId, Arc<PageLoadFn>)>,
    persist: Option<PersistRequest>,
}

/// The application state coordinator, stored as a GPUI global.
pub struct GlobalShell {
    state: AppState,
    router: Router,
    history: History,
    activations: PageActivations,
    services: ShellServices,
}

impl GlobalShell {
    pub fn new(services: ShellServices) -> Self {
        Self {
            state: AppState::new(),
            router: Router::shell_routes(),
            history: History::new(services.initial_url()),
            activations: PageActivations::new(),
            services,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Replace the route table. Takes effect from the next navigation.
    pub fn set_router(&mut self, router: Router) {
        self.router = router;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn activations(&self) -> &PageActivations {
        &self.activations
    }

    pub fn services(&self) -> &ShellServices {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ShellServices {
        &mut self.services
    }

    pub fn current_url(&self) -> &str {
        self.history.current_url()
    }

    /// Module of the current page, once activated.
    pub fn current_module(&self) -> Option<&PageModule> {
        self.activations.module(self.state.page()?)
    }

    fn navigate(&mut self, op: NavigateOp) -> Option<Effects> {
        let url = match op {
            NavigateOp::Current => self.history.current_url().to_string(),
            NavigateOp::Push(url) => self.history.push(url).to,
            NavigateOp::Replace(url) => self.history.replace(url).to,
            NavigateOp::Back => self.history.back()?.to,
            NavigateOp::Forward => self.history.forward()?.to,
        };

        let outcome = self.state.apply_route(self.router.dispatch(&url));
        debug_log!(
            "Navigated to '{}' (page '{}', changed: {})",
            url,
            outcome.page,
            outcome.page_changed
        );
        self.services.analytics.track_page_view(&outcome.requested);

        // Idempotent for pages already loading or active.
        let activation = match self.activations.request(outcome.page, &self.services.pages) {
            ActivationRequest::Start(loader) => Some((outcome.page, loader)),
            ActivationRequest::Unregistered => {
                warn_log!("No page module for '{}'; page region stays empty", outcome.page);
                None
            }
            ActivationRequest::InFlight | ActivationRequest::Ready => None,
        };

        Some(Effects {
            activation,
            persist: None,
        })
    }

    fn handle_event(&mut self, event: ShellEvent) -> Effects {
        trace_log!("Shell event: {:?}", event);
        let persist = match event {
            ShellEvent::Favourite(id) => self.state.favourite(id),
            ShellEvent::Unfavourite(id) => self.state.unfavourite(&id),
            ShellEvent::ToggleDrawer => {
                self.state.toggle_drawer();
                None
            }
        };
        Effects {
            activation: None,
            persist,
        }
    }

    fn report(&self, error: &ShellError) {
        self.services.analytics.track_exception(error);
    }
}

impl std::fmt::Debug for GlobalShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalShell")
            .field("url", &self.current_url())
            .field("page", &self.state.page())
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl Global for GlobalShell {}

// ============================================================================
// UseShell trait
// ============================================================================

/// Access to the global shell from context.
pub trait UseShell {
    fn shell(&self) -> &GlobalShell;

    fn update_shell<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut GlobalShell, &mut App) -> R;
}

impl UseShell for App {
    fn shell(&self) -> &GlobalShell {
        self.global::<GlobalShell>()
    }

    fn update_shell<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut GlobalShell, &mut App) -> R,
    {
        self.update_global(f)
    }
}

// ============================================================================
// init_shell
// ============================================================================

/// Install the global shell.
///
/// Nothing is routed or fetched until [`Shell::start`].
pub fn init_shell<F>(cx: &mut App, services: ShellServices, configure: F)
where
    F: FnOnce(&mut GlobalShell),
{
    let mut shell = GlobalShell::new(services);
    configure(&mut shell);
    cx.set_global(shell);
}

// ============================================================================
// Background work
// ============================================================================

fn run_effects(cx: &mut App, effects: Effects) {
    if let Some((page, loader)) = effects.activation {
        spawn_activation(cx, page, loader);
    }
    if let Some(request) = effects.persist {
        spawn_persist(cx, request);
    }
}

fn spawn_activation(cx: &mut App, page: PageId, loader: Arc<PageLoadFn>) {
    let load = cx.background_executor().spawn(async move { loader() });
    cx.spawn(async move |cx| {
        let result = load.await;
        let _ = cx.update_global::<GlobalShell, _>(|shell, cx| {
            if let Some(err) = shell.activations.complete(page, result) {
                shell.report(&ShellError::from(err));
            }
            cx.refresh_windows();
        });
    })
    .detach();
}

fn spawn_persist(cx: &mut App, request: PersistRequest) {
    let store = cx.global::<GlobalShell>().services.store.clone();
    let write = cx.background_executor().spawn(async move {
        store.save_generation(request.generation, request.favourites.as_slice())
    });
    cx.spawn(async move |cx| {
        if let Err(err) = write.await {
            error_log!("Failed to persist favourites: {}", err);
            let _ = cx.update_global::<GlobalShell, _>(|shell, _| {
                shell.report(&ShellError::from(err));
            });
        }
    })
    .detach();
}

fn apply_hydration(
    shell: &mut GlobalShell,
    ticket: HydrationTicket,
    talks: Result<Vec<TalkRecord>, LoadError>,
    favourites: Vec<FavouriteId>,
) {
    if let Some(err) = shell.state.finish_hydration(ticket, talks, favourites) {
        warn_log!("Catalogue failed to load: {}", err);
        shell.report(&err);
    }
    info_log!(
        "Hydration finished ({} talks, {} favourites, {} still pending)",
        shell.state.talks().len(),
        shell.state.favourites().len(),
        shell.state.pending_hydrations()
    );
}

// ============================================================================
// Shell
// ============================================================================

/// Static API over the [`GlobalShell`].
///
/// ```ignore
/// use gpui_talks_shell::{Shell, ShellEvent};
///
/// Shell::navigate(cx, "/talk/3");
/// Shell::emit(cx, ShellEvent::Favourite("3".into()));
/// Shell::back(cx);
/// ```
pub struct Shell;

impl Shell {
    /// Route the initial URL and start hydration.
    pub fn start(cx: &mut App) {
        Self::run(cx, NavigateOp::Current);
        Self::hydrate(cx);
    }

    /// Navigate to a new URL.
    pub fn navigate(cx: &mut App, url: impl Into<String>) {
        Self::run(cx, NavigateOp::Push(url.into()));
    }

    /// Navigate without adding a history entry.
    pub fn replace(cx: &mut App, url: impl Into<String>) {
        Self::run(cx, NavigateOp::Replace(url.into()));
    }

    pub fn back(cx: &mut App) {
        Self::run(cx, NavigateOp::Back);
    }

    pub fn forward(cx: &mut App) {
        Self::run(cx, NavigateOp::Forward);
    }

    fn run(cx: &mut App, op: NavigateOp) {
        let effects = cx.update_global::<GlobalShell, _>(|shell, _| shell.navigate(op));
        match effects {
            Some(effects) => {
                run_effects(cx, effects);
                cx.refresh_windows();
            }
            None => {
                trace_log!("Navigation ignored: no history entry in that direction");
            }
        }
    }

    /// Deliver a signal to the coordinator.
    pub fn emit(cx: &mut App, event: ShellEvent) {
        let effects = cx.update_global::<GlobalShell, _>(|shell, _| shell.handle_event(event));
        run_effects(cx, effects);
        cx.refresh_windows();
    }

    pub fn favourite(cx: &mut App, id: impl Into<FavouriteId>) {
        Self::emit(cx, ShellEvent::Favourite(id.into()));
    }

    pub fn unfavourite(cx: &mut App, id: impl Into<FavouriteId>) {
        Self::emit(cx, ShellEvent::Unfavourite(id.into()));
    }

    pub fn toggle_drawer(cx: &mut App) {
        Self::emit(cx, ShellEvent::ToggleDrawer);
    }

    /// Fetch the catalogue and load stored favourites.
    ///
    /// Both run concurrently; `is_loading` stays set until both settle.
    /// Stored favourites that cannot be read are logged and treated as empty.
    pub fn hydrate(cx: &mut App) {
        let (ticket, source, store) = cx.update_global::<GlobalShell, _>(|shell, _| {
            (
                shell.state.begin_hydration(),
                Arc::clone(&shell.services.source),
                shell.services.store.clone(),
            )
        });
        debug_log!("Hydrating from {}", source.describe());

        let executor = cx.background_executor();
        let talks = executor.spawn(async move { source.fetch_talks() });
        let favourites = executor.spawn(async move { store.load() });

        cx.spawn(async move |cx| {
            let talks = talks.await;
            let favourites = favourites.await;
            let _ = cx.update_global::<GlobalShell, _>(|shell, cx| {
                apply_hydration(shell, ticket, talks, favourites);
                cx.refresh_windows();
            });
        })
        .detach();
        cx.refresh_windows();
    }

    // ------------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------------

    pub fn current_url(cx: &App) -> String {
        cx.shell().current_url().to_string()
    }

    pub fn page(cx: &App) -> Option<PageId> {
        cx.shell().state().page()
    }

    pub fn props(cx: &App) -> PageProps {
        cx.shell().state().props()
    }

    pub fn favourites(cx: &App) -> FavouriteSet {
        cx.shell().state().favourites().clone()
    }

    pub fn talks(cx: &App) -> Arc<Vec<TalkRecord>> {
        Arc::clone(cx.shell().state().talks())
    }

    pub fn is_loading(cx: &App) -> bool {
        cx.shell().state().is_loading()
    }

    pub fn is_error(cx: &App) -> bool {
        cx.shell().state().is_error()
    }

    pub fn drawer_open(cx: &App) -> bool {
        cx.shell().state().drawer_open()
    }

    pub fn can_go_back(cx: &App) -> bool {
        cx.shell().history().can_go_back()
    }

    pub fn can_go_forward(cx: &App) -> bool {
        cx.shell().history().can_go_forward()
    }
}

// ============================================================================
// Tests
// ============================================================================
