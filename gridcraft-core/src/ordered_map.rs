//! Insertion-ordered keyed container
//!
//! [`OrderedMap`] backs every ordered level of the layout: rows within the
//! tree, columns within a row, and column heights within a row of the
//! heights mirror. Iteration order is render order, so positional
//! operations (`insert_at`, `move_key`) are first-class.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attempted to insert a key that is already present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate key: {key:?}")]
pub struct DuplicateKeyError<K> {
    /// The key that already exists.
    pub key: K,
}

/// An entry removed from an [`OrderedMap`], together with where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<V> {
    /// Position the entry occupied before removal.
    pub index: usize,
    /// The removed value.
    pub value: V,
}

/// A map that remembers insertion order and supports positional edits.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize + Hash + Eq, V: Serialize",
    deserialize = "K: Deserialize<'de> + Hash + Eq, V: Deserialize<'de>"
))]
pub struct OrderedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// Equality is order-sensitive: two maps are equal only when they hold the
/// same entries in the same sequence.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Iterates values in order.
    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get_index(index)
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    /// Looks up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Looks up a value by key for in-place modification.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Position of `key` in iteration order.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_index_of(key)
    }

    /// Inserts `key` so that it occupies position `index`.
    ///
    /// `index` is clamped to `[0, len]`. Returns the position actually used.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKeyError`] if the key is already present; the map
    /// is left untouched.
    pub fn insert_at(&mut self, key: K, value: V, index: usize) -> Result<usize, DuplicateKeyError<K>> {
        if self.entries.contains_key(&key) {
            return Err(DuplicateKeyError { key });
        }
        let index = index.min(self.entries.len());
        self.entries.shift_insert(index, key, value);
        Ok(index)
    }

    /// Appends `key` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKeyError`] if the key is already present.
    pub fn push(&mut self, key: K, value: V) -> Result<usize, DuplicateKeyError<K>> {
        let end = self.entries.len();
        self.insert_at(key, value, end)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    ///
    /// Absent keys are a silent no-op and return `None`.
    pub fn remove_by_key<Q>(&mut self, key: &Q) -> Option<Removed<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .shift_remove_full(key)
            .map(|(index, _, value)| Removed { index, value })
    }

    /// Moves `key` so that it ends up at `target_index`.
    ///
    /// `target_index` is interpreted against the sequence *after* the entry
    /// has been taken out, and is clamped to the last valid slot. Returns the
    /// final position, or `None` if the key is absent.
    pub fn move_key<Q>(&mut self, key: &Q, target_index: usize) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let from = self.entries.get_index_of(key)?;
        let to = target_index.min(self.entries.len() - 1);
        if from != to {
            self.entries.move_index(from, to);
        }
        Some(to)
    }

    /// Builds a map from ordered entries, rejecting repeated keys.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKeyError`] carrying the first repeated key.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, DuplicateKeyError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in entries {
            map.push(key, value)?;
        }
        Ok(map)
    }
}

impl<K: Clone, V: Clone> OrderedMap<K, V> {
    /// Ordered copy of all entries.
    #[must_use]
    pub fn to_ordered_entries(&self) -> Vec<(K, V)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
