//! # gpui-talks-shell
//!
//! Navigation and client-state core of a GPUI talks app.
//!
//! The crate maps URLs to pages through an ordered route table, validates
//! the requested page against a closed set, activates page UI lazily on the
//! background executor, and keeps the user's favourite talks in sync between
//! memory and a durable key-value store.
//!
//! ```text
//!  URL ──► Router ──► RouteContext ──► AppState::apply_route ──► PageId
//!                                                  │                │
//!                                       analytics page view   PageActivations
//!
//!  ShellEvent::Favourite ──► AppState ──► PersistRequest ──► FavouritesStore
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use gpui_talks_shell::*;
//!
//! let pages = PageRegistry::new()
//!     .with_module(PageId::Home, PageModule::new(|props, _window, _cx| {
//!         gpui::div().child(format!("{} talks", props.talks.len())).into_any_element()
//!     }));
//!
//! let services = ShellServices::from_config(&ShellConfig::default())?.with_pages(pages);
//! init_shell(cx, services, |_| {});
//! Shell::start(cx);
//! ```
//!
//! # Routing
//!
//! ```
//! use gpui_talks_shell::{validate_page, PageId, Router};
//!
//! let router = Router::shell_routes();
//! let route = router.dispatch("/talk/42?from=home");
//!
//! assert_eq!(route.page(), "talk");
//! assert_eq!(route.params.get("id"), Some("42"));
//! assert_eq!(route.query_params.get("from"), Some("home"));
//! assert_eq!(validate_page(Some(route.page())), PageId::Talk);
//! ```
//!
//! # Features
//!
//! | Feature   | Default | Description                   |
//! |-----------|---------|-------------------------------|
//! | `log`     | yes     | Log through the `log` crate   |
//! | `tracing` | no      | Log through `tracing` instead |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analytics;
pub mod catalogue;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod favourites;
pub mod history;
pub mod loader;
pub mod logging;
pub mod matching;
pub mod middleware;
pub mod page;
pub mod params;
pub mod router;
pub mod storage;
pub mod widgets;

pub use analytics::{Analytics, LogAnalytics, NoopAnalytics};
pub use catalogue::{parse_catalogue, FileTalkSource, HttpTalkSource, TalkRecord, TalkSource};
pub use config::{CatalogueLocation, ShellConfig, DEFAULT_CATALOGUE_URL};
pub use context::{init_shell, GlobalShell, Shell, ShellEvent, ShellServices, UseShell};
pub use coordinator::{AppState, HydrationTicket, PageProps, PersistRequest, RouteOutcome};
pub use error::{ConfigError, LoadError, PageLoadError, ShellError, StorageError};
pub use favourites::{FavouriteId, FavouriteSet};
pub use history::{History, HistoryChange, NavigationDirection};
pub use loader::{
    Activation, ActivationRequest, PageActivations, PageLoadFn, PageModule, PageRegistry,
    PageRenderFn,
};
pub use matching::RoutePattern;
pub use middleware::{
    handler_fn, Captured, FixedPage, Flow, FnHandler, QueryParser, RouteHandler, RouteRequest,
};
pub use page::{validate_page, PageId, UnknownPage};
pub use params::{parse_query_params, QueryParams, RouteParams};
pub use router::{RouteContext, Router};
pub use storage::{FavouritesStore, FileMedium, KeyValueMedium, MemoryMedium, FAVOURITES_KEY};
pub use widgets::{nav_link, page_outlet, NavLink, PageOutlet};
