//! Favourite identifiers and the copy-on-write favourite set.
//!
//! A [`FavouriteSet`] is never edited in place. [`with_added`] and
//! [`without`] return a new set (or `None` when the operation is a no-op),
//! so a renderer holding an older snapshot keeps seeing exactly what it was
//! given.
//!
//! [`with_added`]: FavouriteSet::with_added
//! [`without`]: FavouriteSet::without
//!
//! ```
//! use gpui_talks_shell::{FavouriteId, FavouriteSet};
//!
//! let empty = FavouriteSet::new();
//! let one = empty.with_added(FavouriteId::from("1")).unwrap();
//! assert!(empty.is_empty());
//! assert_eq!(one.as_strs(), vec!["1"]);
//! assert!(one.with_added(FavouriteId::from("1")).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a favourited talk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavouriteId(String);

impl FavouriteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for FavouriteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FavouriteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for FavouriteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered collection of unique favourite ids. Cheap to clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    ids: Arc<Vec<FavouriteId>>,
}

impl FavouriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ids, keeping the first occurrence of each duplicate.
    pub fn from_ids(ids: impl IntoIterator<Item = FavouriteId>) -> Self {
        let mut unique: Vec<FavouriteId> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            ids: Arc::new(unique),
        }
    }

    pub fn contains(&self, id: &FavouriteId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavouriteId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[FavouriteId] {
        &self.ids
    }

    /// Ids as string slices, mostly for assertions.
    pub fn as_strs(&self) -> Vec<&str> {
        self.ids.iter().map(FavouriteId::as_str).collect()
    }

    pub fn to_vec(&self) -> Vec<FavouriteId> {
        self.ids.as_ref().clone()
    }

    /// New set with `id` appended, or `None` if it is already present.
    pub fn with_added(&self, id: FavouriteId) -> Option<Self> {
        if self.contains(&id) {
            return None;
        }
        let mut ids = self.to_vec();
        ids.push(id);
        Some(Self { ids: Arc::new(ids) })
    }

    /// New set with the first occurrence of `id` removed, or `None` if absent.
    pub fn without(&self, id: &FavouriteId) -> Option<Self> {
        let position = self.ids.iter().position(|existing| existing == id)?;
        let mut ids = self.to_vec();
        ids.remove(position);
        Some(Self { ids: Arc::new(ids) })
    }

    /// `true` if both sets share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ids, &other.ids)
    }
}

impl<'a> IntoIterator for &'a FavouriteSet {
    type Item = &'a FavouriteId;
    type IntoIter = std::slice::Iter<'a, FavouriteId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<FavouriteId> for FavouriteSet {
    fn from_iter<I: IntoIterator<Item = FavouriteId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
