//! Durable storage for the favourite set.
//!
//! Two layers:
//!
//! - [`KeyValueMedium`]: a string-to-string store. [`FileMedium`] keeps one
//!   file per key in a directory; [`MemoryMedium`] is process-local.
//! - [`FavouritesStore`]: the favourites view of a medium, bound to the
//!   fixed key [`FAVOURITES_KEY`] and encoding the set as a JSON array of
//!   strings.
//!
//! Reads never fail the caller: a missing key, an I/O error, or corrupt
//! JSON all load as an empty set. Writes replace the whole value at once.
//!
//! ```
//! use gpui_talks_shell::{FavouriteId, FavouritesStore, MemoryMedium};
//! use std::sync::Arc;
//!
//! let store = FavouritesStore::new(Arc::new(MemoryMedium::new()));
//! assert!(store.load().is_empty());
//!
//! store.save(&[FavouriteId::from("1"), FavouriteId::from("4")]).unwrap();
//! assert_eq!(store.load(), vec![FavouriteId::from("1"), FavouriteId::from("4")]);
//! ```

use crate::error::StorageError;
use crate::favourites::FavouriteId;
use crate::{debug_log, trace_log, warn_log};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key under which the favourite set is stored.
pub const FAVOURITES_KEY: &str = "favouriteTalks";

/// A durable string key-value medium.
///
/// Implementations must make [`set`](Self::set) all-or-nothing: a reader
/// sees either the old value or the new one.
pub trait KeyValueMedium: Send + Sync + 'static {
    /// `Ok(None)` when the key has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// FileMedium
// ============================================================================

/// One `<key>.json` file per key under a directory.
///
/// Writes go to a sibling temp file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        trace_log!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// MemoryMedium
// ============================================================================

/// In-process medium. Survives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

// ============================================================================
// FavouritesStore
// ============================================================================

/// Load/save/clear of the favourite set against a [`KeyValueMedium`].
///
/// Clones share the medium and the write-ordering state.
#[derive(Clone)]
pub struct FavouritesStore {
    medium: Arc<dyn KeyValueMedium>,
    /// Generation of the newest write that reached the medium.
    written: Arc<Mutex<u64>>,
}

impl FavouritesStore {
    pub fn new(medium: Arc<dyn KeyValueMedium>) -> Self {
        Self {
            medium,
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Store backed by a fresh [`MemoryMedium`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()))
    }

    /// Store backed by a [`FileMedium`] in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileMedium::new(dir)))
    }

    pub fn medium(&self) -> &Arc<dyn KeyValueMedium> {
        &self.medium
    }

    /// Load the stored ids, or an empty list if there are none or they
    /// cannot be read.
    pub fn load(&self) -> Vec<FavouriteId> {
        match self.try_load() {
            Ok(ids) => ids,
            Err(err) => {
                warn_log!("Stored favourites unreadable, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces the failure.
    pub fn try_load(&self) -> Result<Vec<FavouriteId>, StorageError> {
        let Some(raw) = self.medium.get(FAVOURITES_KEY)? else {
            return Ok(Vec::new());
        };
        let ids: Vec<FavouriteId> = serde_json::from_str(&raw)?;

        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(unique)
    }

    /// Replace the stored ids.
    pub fn save(&self, ids: &[FavouriteId]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(ids)?;
        self.medium.set(FAVOURITES_KEY, &raw)
    }

    /// Replace the stored ids unless a newer generation was already written.
    ///
    /// Returns `Ok(false)` when the write was skipped as stale. Holding the
    /// lock across the write keeps check and write in one step.
    pub fn save_generation(&self, generation: u64, ids: &[FavouriteId]) -> Result<bool, StorageError> {
        let mut written = self.written.lock().map_err(|_| StorageError::Poisoned)?;
        if generation < *written {
            debug_log!(
                "Skipping stale favourites write (generation {} < {})",
                generation,
                *written
            );
            return Ok(false);
        }
        self.save(ids)?;
        *written = generation;
        Ok(true)
    }

    /// Remove the stored ids and reset write ordering, so generations
    /// numbered from zero again are accepted.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut written = self.written.lock().map_err(|_| StorageError::Poisoned)?;
        self.medium.remove(FAVOURITES_KEY)?;
        *written = 0;
        Ok(())
    }
}

impl std::fmt::Debug for FavouritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavouritesStore")
            .field("key", &FAVOURITES_KEY)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<FavouriteId> {
        raw.iter().map(|id| FavouriteId::from(*id)).collect()
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let store = FavouritesStore::in_memory();
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = FavouritesStore::in_memory();
        store.save(&ids(&["1", "4"])).unwrap();
        assert_eq!(store.load(), ids(&["1", "4"]));
        assert_eq!(
            store.medium().get(FAVOURITES_KEY).unwrap().as_deref(),
            Some(r#"["1","4"]"#)
        );
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let store = FavouritesStore::in_memory();
        store.medium().set(FAVOURITES_KEY, "{not json").unwrap();
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(StorageError::Serde(_))));

        store.medium().set(FAVOURITES_KEY, r#"{"a":1}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_duplicates_collapse_on_load() {
        let store = FavouritesStore::in_memory();
        store.medium().set(FAVOURITES_KEY, r#"["2","1","2"]"#).unwrap();
        assert_eq!(store.load(), ids(&["2", "1"]));
    }

    #[test]
    fn test_clear() {
        let store = FavouritesStore::in_memory();
        store.save(&ids(&["1"])).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn test_clear_resets_generation() {
        let store = FavouritesStore::in_memory();
        assert!(store.save_generation(5, &ids(&["1"])).unwrap());
        store.clear().unwrap();

        assert!(store.save_generation(1, &ids(&["2"])).unwrap());
        assert_eq!(store.load(), ids(&["2"]));
    }

    #[test]
    fn test_stale_generation_skipped() {
        let store = FavouritesStore::in_memory();
        assert!(store.save_generation(2, &ids(&["1", "2"])).unwrap());
        assert!(!store.save_generation(1, &ids(&["1"])).unwrap());
        assert_eq!(store.load(), ids(&["1", "2"]));

        assert!(store.save_generation(3, &ids(&["2"])).unwrap());
        assert_eq!(store.load(), ids(&["2"]));
    }

    #[test]
    fn test_clones_share_generation() {
        let store = FavouritesStore::in_memory();
        let other = store.clone();
        store.save_generation(5, &ids(&["5"])).unwrap();
        assert!(!other.save_generation(4, &ids(&["4"])).unwrap());
        assert_eq!(other.load(), ids(&["5"]));
    }

    #[test]
    fn test_file_medium_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FavouritesStore::in_dir(dir.path().join("nested"));
        assert!(store.load().is_empty());

        store.save(&ids(&["20"])).unwrap();
        assert!(dir.path().join("nested/favouriteTalks.json").exists());
        assert!(!dir.path().join("nested/favouriteTalks.json.tmp").exists());

        let reopened = FavouritesStore::in_dir(dir.path().join("nested"));
        assert_eq!(reopened.load(), ids(&["20"]));

        reopened.clear().unwrap();
        assert!(!dir.path().join("nested/favouriteTalks.json").exists());
    }

    #[test]
    fn test_file_medium_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path());
        assert!(matches!(
            medium.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(medium.get(""), Err(StorageError::InvalidKey(_))));
    }
}
