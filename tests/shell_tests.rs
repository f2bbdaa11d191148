//! End-to-end behaviour of the shell inside a GPUI test app.

mod common;

use common::*;
use gpui::TestAppContext;
use gpui_talks_shell::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn ids(raw: &[&str]) -> Vec<FavouriteId> {
    raw.iter().map(|id| FavouriteId::from(*id)).collect()
}

// ---- favourites ----

#[gpui::test]
fn test_favourite_then_favourite_again(cx: &mut TestAppContext) {
    let medium = Arc::new(FlakyMedium::default());
    let harness = install(
        cx,
        ok_source(Vec::new()),
        FavouritesStore::new(medium.clone()),
        PageRegistry::new(),
    );

    cx.update(|cx| Shell::favourite(cx, "1"));
    cx.run_until_parked();
    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["1"]);
    assert_eq!(harness.store.load(), ids(&["1"]));
    assert_eq!(medium.writes.load(Ordering::SeqCst), 1);

    cx.update(|cx| Shell::favourite(cx, "1"));
    cx.run_until_parked();
    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["1"]);
    assert_eq!(harness.store.load(), ids(&["1"]));
    assert_eq!(medium.writes.load(Ordering::SeqCst), 1);
}

#[gpui::test]
fn test_unfavourite_middle(cx: &mut TestAppContext) {
    let store = FavouritesStore::in_memory();
    store.save(&ids(&["1", "2", "3"])).unwrap();
    let harness = install(cx, ok_source(Vec::new()), store, PageRegistry::new());

    cx.update(Shell::hydrate);
    cx.run_until_parked();
    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["1", "2", "3"]);

    cx.update(|cx| Shell::emit(cx, ShellEvent::Unfavourite("2".into())));
    cx.run_until_parked();

    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["1", "3"]);
    assert_eq!(harness.store.load(), ids(&["1", "3"]));
}

#[gpui::test]
fn test_unfavourite_absent_does_not_write(cx: &mut TestAppContext) {
    let medium = Arc::new(FlakyMedium::default());
    install(
        cx,
        ok_source(Vec::new()),
        FavouritesStore::new(medium.clone()),
        PageRegistry::new(),
    );

    cx.update(|cx| Shell::unfavourite(cx, "9"));
    cx.run_until_parked();

    assert!(cx.read(Shell::favourites).is_empty());
    assert_eq!(medium.writes.load(Ordering::SeqCst), 0);
}

#[gpui::test]
fn test_latest_set_wins_after_burst(cx: &mut TestAppContext) {
    let harness = install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    cx.update(|cx| {
        Shell::favourite(cx, "1");
        Shell::favourite(cx, "2");
        Shell::unfavourite(cx, "1");
        Shell::favourite(cx, "3");
    });
    cx.run_until_parked();

    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["2", "3"]);
    assert_eq!(harness.store.load(), ids(&["2", "3"]));
}

#[gpui::test]
fn test_persist_failure_is_reported_not_propagated(cx: &mut TestAppContext) {
    let harness = install(
        cx,
        ok_source(Vec::new()),
        FavouritesStore::new(Arc::new(FlakyMedium::failing_writes())),
        PageRegistry::new(),
    );

    cx.update(|cx| Shell::favourite(cx, "5"));
    cx.run_until_parked();

    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["5"]);
    assert_eq!(harness.analytics.exceptions(), vec!["storage"]);
    assert!(!cx.read(Shell::is_error));
}

// ---- hydration ----

#[gpui::test]
fn test_hydration_loads_catalogue_and_favourites(cx: &mut TestAppContext) {
    let store = FavouritesStore::in_memory();
    store.save(&ids(&["1", "4"])).unwrap();
    let talks = vec![talk("1", "Rust"), talk("4", "GPUI")];
    let harness = install(cx, ok_source(talks), store, PageRegistry::new());

    cx.update(Shell::hydrate);
    assert!(cx.read(Shell::is_loading));

    cx.run_until_parked();
    assert!(!cx.read(Shell::is_loading));
    assert!(!cx.read(Shell::is_error));
    assert_eq!(cx.read(Shell::talks).len(), 2);
    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["1", "4"]);
    assert!(harness.analytics.exceptions().is_empty());

    let props = cx.read(Shell::props);
    let titles: Vec<_> = props.favourite_talks().iter().map(|t| t.title.clone()).collect();
    assert_eq!(titles, vec!["Rust", "GPUI"]);
}

#[gpui::test]
fn test_fetch_rejection(cx: &mut TestAppContext) {
    let harness = install(
        cx,
        failing_source(|| LoadError::Unavailable("offline".to_string())),
        FavouritesStore::in_memory(),
        PageRegistry::new(),
    );

    cx.update(Shell::hydrate);
    cx.run_until_parked();

    assert!(cx.read(Shell::is_error));
    assert!(!cx.read(Shell::is_loading));
    assert!(cx.read(Shell::talks).is_empty());
    assert_eq!(harness.analytics.exceptions(), vec!["catalogue"]);
}

#[gpui::test]
fn test_non_success_status(cx: &mut TestAppContext) {
    install(
        cx,
        failing_source(|| LoadError::Status { status: 503 }),
        FavouritesStore::in_memory(),
        PageRegistry::new(),
    );

    cx.update(Shell::hydrate);
    cx.run_until_parked();

    assert!(cx.read(Shell::talks).is_empty());
    assert!(cx.read(Shell::is_error));
}

#[gpui::test]
fn test_failed_fetch_still_loads_favourites(cx: &mut TestAppContext) {
    let store = FavouritesStore::in_memory();
    store.save(&ids(&["8"])).unwrap();
    install(
        cx,
        failing_source(|| LoadError::Status { status: 500 }),
        store,
        PageRegistry::new(),
    );

    cx.update(Shell::hydrate);
    cx.run_until_parked();

    assert!(cx.read(Shell::is_error));
    assert_eq!(cx.read(Shell::favourites).as_strs(), vec!["8"]);
}

#[gpui::test]
fn test_failed_favourites_still_loads_catalogue(cx: &mut TestAppContext) {
    let harness = install(
        cx,
        ok_source(vec![talk("1", "Rust")]),
        FavouritesStore::new(Arc::new(FlakyMedium::failing_reads())),
        PageRegistry::new(),
    );

    cx.update(Shell::hydrate);
    cx.run_until_parked();

    assert!(!cx.read(Shell::is_error));
    assert!(!cx.read(Shell::is_loading));
    assert!(cx.read(Shell::favourites).is_empty());
    assert_eq!(cx.read(Shell::talks).len(), 1);
    assert!(harness.analytics.exceptions().is_empty());
}

#[gpui::test]
fn test_corrupt_favourites_start_empty(cx: &mut TestAppContext) {
    let store = FavouritesStore::in_memory();
    store.medium().set(FAVOURITES_KEY, "{not json").unwrap();
    let harness = install(cx, ok_source(vec![talk("1", "Rust")]), store, PageRegistry::new());

    cx.update(Shell::hydrate);
    cx.run_until_parked();

    assert!(!cx.read(Shell::is_error));
    assert!(!cx.read(Shell::is_loading));
    assert!(cx.read(Shell::favourites).is_empty());
    assert_eq!(cx.read(Shell::talks).len(), 1);
    assert!(harness.analytics.exceptions().is_empty());
}

// ---- navigation ----

#[gpui::test]
fn test_start_routes_initial_url(cx: &mut TestAppContext) {
    init_logging();
    let services = ShellServices::new(ok_source(Vec::new())).with_initial_url("/sponsors");
    cx.update(|cx| init_shell(cx, services, |_| {}));

    cx.update(Shell::start);
    assert_eq!(cx.read(Shell::page), Some(PageId::Sponsors));
    assert!(cx.read(Shell::is_loading));

    cx.run_until_parked();
    assert!(!cx.read(Shell::is_loading));
}

#[gpui::test]
fn test_page_views_use_requested_name(cx: &mut TestAppContext) {
    let harness = install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    for url in ["/", "/favourites", "/nonexistent", "/talk/3", "/a/b"] {
        cx.update(|cx| Shell::navigate(cx, url));
    }

    assert_eq!(
        harness.analytics.views(),
        vec!["home", "favourites", "nonexistent", "talk", ""]
    );
    assert_eq!(cx.read(Shell::page), Some(PageId::Home));
}

#[gpui::test]
fn test_unknown_page_is_lost(cx: &mut TestAppContext) {
    install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    cx.update(|cx| Shell::navigate(cx, "/nonexistent"));
    assert_eq!(cx.read(Shell::page), Some(PageId::Lost));

    cx.update(|cx| Shell::navigate(cx, "/Home"));
    assert_eq!(cx.read(Shell::page), Some(PageId::Lost));
}

#[gpui::test]
fn test_query_params_reach_route(cx: &mut TestAppContext) {
    install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    cx.update(|cx| Shell::navigate(cx, "/home?hi=everyone&hi=again#top"));
    let route = cx.read(|cx| Shell::props(cx).route);

    assert_eq!(route.query_params.get("hi"), Some("again"));
    assert_eq!(route.page(), "home");
    assert!(!route.params.contains("hi"));
}

#[gpui::test]
fn test_each_page_loads_once(cx: &mut TestAppContext) {
    let loads = Arc::new(AtomicUsize::new(0));
    install(
        cx,
        ok_source(Vec::new()),
        FavouritesStore::in_memory(),
        counting_registry(loads.clone()),
    );

    cx.update(|cx| Shell::navigate(cx, "/"));
    cx.update(|cx| Shell::navigate(cx, "/home"));
    cx.run_until_parked();
    cx.update(|cx| Shell::navigate(cx, "/favourites"));
    cx.run_until_parked();
    cx.update(Shell::back);
    cx.update(Shell::forward);
    cx.run_until_parked();

    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert!(cx.read(|cx| cx.shell().activations().is_ready(PageId::Home)));
    assert!(cx.read(|cx| cx.shell().activations().is_ready(PageId::Favourites)));
}

#[gpui::test]
fn test_replace_keeps_history_length(cx: &mut TestAppContext) {
    install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    cx.update(|cx| Shell::navigate(cx, "/terms"));
    cx.update(|cx| Shell::replace(cx, "/privacy"));

    assert_eq!(cx.read(|cx| cx.shell().history().len()), 2);
    assert_eq!(cx.read(Shell::current_url), "/privacy");

    cx.update(Shell::back);
    assert_eq!(cx.read(Shell::current_url), "/");
    assert_eq!(cx.read(Shell::page), Some(PageId::Home));
}

#[gpui::test]
fn test_toggle_drawer_and_close_on_route(cx: &mut TestAppContext) {
    install(cx, ok_source(Vec::new()), FavouritesStore::in_memory(), PageRegistry::new());

    cx.update(Shell::toggle_drawer);
    assert!(cx.read(Shell::drawer_open));
    cx.update(Shell::toggle_drawer);
    assert!(!cx.read(Shell::drawer_open));

    cx.update(Shell::toggle_drawer);
    cx.update(|cx| Shell::navigate(cx, "/privacy"));
    assert!(!cx.read(Shell::drawer_open));
}
