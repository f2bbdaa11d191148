//! Application state and its mutation rules.
//!
//! [`AppState`] is the single owner of everything pages render from. It is
//! deliberately free of GPUI and I/O: every method is a synchronous state
//! transition that returns the side effects the caller
//! ([`GlobalShell`](crate::GlobalShell)) must run.
//!
//! # Favourites
//!
//! | Signal          | Present | Absent                            |
//! |-----------------|---------|-----------------------------------|
//! | `favourite(F)`  | no-op   | append, replace set, persist      |
//! | `unfavourite(F)`| remove first occurrence, replace set, persist | no-op |
//!
//! Every accepted mutation bumps a generation counter carried by the
//! [`PersistRequest`], which lets the store drop writes that land out of
//! order.
//!
//! # Hydration
//!
//! [`begin_hydration`](AppState::begin_hydration) raises `is_loading` and
//! hands out a [`HydrationTicket`]. [`finish_hydration`](AppState::finish_hydration)
//! takes the ticket with both outcomes. Only the catalogue can fail: stored
//! favourites that cannot be read arrive as an empty list. `is_loading` is
//! cleared once every outstanding hydration has finished.

use crate::catalogue::TalkRecord;
use crate::error::{LoadError, ShellError};
use crate::favourites::{FavouriteId, FavouriteSet};
use crate::page::{validate_page, PageId};
use crate::router::RouteContext;
use crate::{debug_log, info_log, trace_log};
use std::sync::Arc;

/// Read-only snapshot handed to page render functions.
#[derive(Debug, Clone, Default)]
pub struct PageProps {
    pub route: RouteContext,
    pub talks: Arc<Vec<TalkRecord>>,
    pub favourites: FavouriteSet,
    pub is_loading: bool,
    pub is_error: bool,
}

impl PageProps {
    /// The talk selected by `params.id`, if any.
    pub fn selected_talk(&self) -> Option<&TalkRecord> {
        let id = self.route.params.get("id")?;
        self.talks.iter().find(|talk| talk.id.as_str() == id)
    }

    /// Talks whose id is in the favourite set, in catalogue order.
    pub fn favourite_talks(&self) -> Vec<&TalkRecord> {
        self.talks
            .iter()
            .filter(|talk| self.favourites.contains(&talk.id))
            .collect()
    }
}

/// Effects of applying a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// `params.page` exactly as routed, for the page-view report.
    pub requested: String,
    /// The validated page now current.
    pub page: PageId,
    /// `true` if the page differs from the previous one.
    pub page_changed: bool,
}

/// A favourite snapshot to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistRequest {
    pub generation: u64,
    pub favourites: FavouriteSet,
}

/// The live state of the shell.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    page: Option<PageId>,
    route: RouteContext,
    favourites: FavouriteSet,
    talks: Arc<Vec<TalkRecord>>,
    is_loading: bool,
    is_error: bool,
    drawer_open: bool,
    generation: u64,
    /// Hydrations begun and not yet finished.
    pending_hydrations: usize,
}

/// Issued by [`AppState::begin_hydration`]; records the favourites
/// generation the stored set will be compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct HydrationTicket {
    base_generation: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current page; `None` until the first route is applied.
    pub fn page(&self) -> Option<PageId> {
        self.page
    }

    pub fn route(&self) -> &RouteContext {
        &self.route
    }

    pub fn favourites(&self) -> &FavouriteSet {
        &self.favourites
    }

    pub fn talks(&self) -> &Arc<Vec<TalkRecord>> {
        &self.talks
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Mutation generation of the favourite set.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn props(&self) -> PageProps {
        PageProps {
            route: self.route.clone(),
            talks: Arc::clone(&self.talks),
            favourites: self.favourites.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
        }
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Replace the route and derive the page from `params.page`.
    ///
    /// The drawer is closed on every route change.
    pub fn apply_route(&mut self, route: RouteContext) -> RouteOutcome {
        let requested = route.page().to_string();
        let page = validate_page(Some(&requested));
        let page_changed = self.page != Some(page);

        trace_log!(
            "Route '{}' → page '{}' (requested '{}')",
            route.path,
            page,
            requested
        );

        self.route = route;
        self.page = Some(page);
        self.drawer_open = false;

        RouteOutcome {
            requested,
            page,
            page_changed,
        }
    }

    // ========================================================================
    // Drawer
    // ========================================================================

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    // ========================================================================
    // Favourites
    // ========================================================================

    /// Add `id` unless already present.
    pub fn favourite(&mut self, id: FavouriteId) -> Option<PersistRequest> {
        let Some(next) = self.favourites.with_added(id) else {
            trace_log!("Favourite ignored: already present");
            return None;
        };
        Some(self.replace_favourites(next))
    }

    /// Remove the first occurrence of `id` if present.
    pub fn unfavourite(&mut self, id: &FavouriteId) -> Option<PersistRequest> {
        let Some(next) = self.favourites.without(id) else {
            trace_log!("Unfavourite of '{}' ignored: not present", id);
            return None;
        };
        Some(self.replace_favourites(next))
    }

    fn replace_favourites(&mut self, next: FavouriteSet) -> PersistRequest {
        self.favourites = next;
        self.generation += 1;
        debug_log!(
            "Favourites now {} ids (generation {})",
            self.favourites.len(),
            self.generation
        );
        PersistRequest {
            generation: self.generation,
            favourites: self.favourites.clone(),
        }
    }

    // ========================================================================
    // Hydration
    // ========================================================================

    pub fn begin_hydration(&mut self) -> HydrationTicket {
        self.is_loading = true;
        self.pending_hydrations += 1;
        HydrationTicket {
            base_generation: self.generation,
        }
    }

    /// Number of hydrations still in flight.
    pub fn pending_hydrations(&self) -> usize {
        self.pending_hydrations
    }

    /// Apply the outcomes of the hydration `ticket` was issued for.
    ///
    /// A failed catalogue leaves the previous talks in place, sets
    /// `is_error` and is returned for reporting. Stored favourites are only
    /// applied if the set has not changed since this hydration began;
    /// otherwise the in-session set (already persisted) wins.
    pub fn finish_hydration(
        &mut self,
        ticket: HydrationTicket,
        talks: Result<Vec<TalkRecord>, LoadError>,
        favourites: Vec<FavouriteId>,
    ) -> Option<ShellError> {
        let error = match talks {
            Ok(talks) => {
                info_log!("Catalogue loaded: {} talks", talks.len());
                self.talks = Arc::new(talks);
                None
            }
            Err(err) => {
                self.is_error = true;
                Some(ShellError::from(err))
            }
        };

        if ticket.base_generation == self.generation {
            self.favourites = FavouriteSet::from_ids(favourites);
        } else {
            debug_log!(
                "Favourites changed during hydration (generation {} → {}); keeping in-session set",
                ticket.base_generation,
                self.generation
            );
        }

        self.pending_hydrations = self.pending_hydrations.saturating_sub(1);
        self.is_loading = self.pending_hydrations > 0;

        error
    }
}
