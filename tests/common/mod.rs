//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use gpui::{div, IntoElement, ParentElement, TestAppContext};
use gpui_talks_shell::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Route test logs through `env_logger`; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Analytics collaborator that records everything it receives.
#[derive(Default)]
pub struct RecordingAnalytics {
    views: Mutex<Vec<String>>,
    exceptions: Mutex<Vec<String>>,
}

impl RecordingAnalytics {
    pub fn views(&self) -> Vec<String> {
        self.views.lock().unwrap().clone()
    }

    /// `kind` of each reported error.
    pub fn exceptions(&self) -> Vec<String> {
        self.exceptions.lock().unwrap().clone()
    }
}

impl Analytics for RecordingAnalytics {
    fn track_page_view(&self, name: &str) {
        self.views.lock().unwrap().push(name.to_string());
    }

    fn track_exception(&self, error: &ShellError) {
        self.exceptions.lock().unwrap().push(error.kind().to_string());
    }
}

/// Medium whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyMedium {
    inner: MemoryMedium,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl FlakyMedium {
    pub fn failing_writes() -> Self {
        let medium = Self::default();
        medium.fail_writes.store(true, Ordering::SeqCst);
        medium
    }

    pub fn failing_reads() -> Self {
        let medium = Self::default();
        medium.fail_reads.store(true, Ordering::SeqCst);
        medium
    }
}

impl KeyValueMedium for FlakyMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected("read refused".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected("quota exceeded".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub fn talk(id: &str, title: &str) -> TalkRecord {
    TalkRecord {
        id: FavouriteId::from(id),
        title: title.to_string(),
        date: Utc.with_ymd_and_hms(2020, 2, 11, 20, 18, 20).unwrap(),
        speaker: "Roger".to_string(),
        description: "blblbllblblblbl".to_string(),
    }
}

pub fn ok_source(talks: Vec<TalkRecord>) -> impl TalkSource {
    move || Ok::<_, LoadError>(talks.clone())
}

pub fn failing_source(error: fn() -> LoadError) -> impl TalkSource {
    move || Err::<Vec<TalkRecord>, _>(error())
}

pub fn blank_module() -> PageModule {
    PageModule::new(|_, _, _| div().child("page").into_any_element())
}

/// Registry with a blank module for every page, counting loads.
pub fn counting_registry(loads: Arc<AtomicUsize>) -> PageRegistry {
    PageId::ALL.iter().fold(PageRegistry::new(), |registry, page| {
        let loads = loads.clone();
        registry.with(*page, move || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(blank_module())
        })
    })
}

pub struct Harness {
    pub analytics: Arc<RecordingAnalytics>,
    pub store: FavouritesStore,
}

/// Install a shell with recording analytics and the given collaborators.
pub fn install(
    cx: &mut TestAppContext,
    source: impl TalkSource,
    store: FavouritesStore,
    pages: PageRegistry,
) -> Harness {
    init_logging();
    let analytics = Arc::new(RecordingAnalytics::default());
    let services = ShellServices::new(source)
        .with_store(store.clone())
        .with_analytics(analytics.clone())
        .with_pages(pages);
    cx.update(|cx| init_shell(cx, services, |_| {}));
    Harness { analytics, store }
}
