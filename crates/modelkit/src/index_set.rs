//! Immutable ordered key universes.
//!
//! An [`IndexSet`] is built once from a collection of keys and then shared
//! read-only (via [`Arc`]) by every container constructed over it. It
//! preserves insertion order for iteration, verifies index uniqueness at
//! construction, and answers membership and ordinal lookups in O(1).

use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::IndexSetError;
use crate::indexed::{Indexed, Named};

/// Immutable ordered universe of keys with unique small-integer identities.
#[derive(Debug, Clone)]
pub struct IndexSet<K: Indexed> {
    items: Vec<K>,
    by_index: FxHashMap<usize, usize>,
    max_index: usize,
}

impl<K: Indexed> IndexSet<K> {
    /// Build a universe from a collection of keys, preserving order.
    ///
    /// Fails if two keys report the same index; a universe with colliding
    /// identities must never become usable.
    pub fn new(keys: impl IntoIterator<Item = K>) -> Result<Self, IndexSetError> {
        let items: Vec<K> = keys.into_iter().collect();
        let mut by_index = FxHashMap::default();
        by_index.reserve(items.len());
        let mut max_index = 0;
        for (position, key) in items.iter().enumerate() {
            let index = key.index();
            if by_index.insert(index, position).is_some() {
                return Err(IndexSetError::DuplicateIndex { index });
            }
            max_index = max_index.max(index);
        }
        Ok(Self {
            items,
            by_index,
            max_index,
        })
    }

    /// Build a universe and wrap it for sharing in one step.
    pub fn shared(keys: impl IntoIterator<Item = K>) -> Result<Arc<Self>, IndexSetError> {
        Ok(Arc::new(Self::new(keys)?))
    }

    /// Number of member keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest index reported by any member key.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Slot count a dense container over this universe allocates
    /// (`max_index + 1`; zero for an empty universe). With sparse indices
    /// this exceeds [`len`](Self::len).
    #[must_use]
    pub fn capacity(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.max_index + 1
        }
    }

    /// Membership test keyed on the index identity.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.by_index.contains_key(&key.index())
    }

    /// Ordinal position of a key in iteration order.
    #[must_use]
    pub fn position(&self, key: &K) -> Option<usize> {
        self.by_index.get(&key.index()).copied()
    }

    /// Key at an ordinal position in the backing sequence. This is not a
    /// lookup by index value; the two differ when indices are sparse.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&K> {
        self.items.get(position)
    }

    /// Iterate member keys in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Member keys as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }
}

impl<'a, K: Indexed> IntoIterator for &'a IndexSet<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An [`IndexSet`] whose keys also expose a name, adding name→key lookup.
///
/// Duplicate names are not an error: the later key wins the name mapping,
/// matching the behaviour persistence collaborators rely on when a source
/// redefines a label.
#[derive(Debug, Clone)]
pub struct NamedIndexSet<K: Indexed + Named> {
    inner: Arc<IndexSet<K>>,
    by_name: FxHashMap<String, usize>,
}

impl<K: Indexed + Named> NamedIndexSet<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Result<Self, IndexSetError> {
        Ok(Self::from_set(IndexSet::shared(keys)?))
    }

    /// Build a universe and wrap it for sharing in one step.
    pub fn shared(keys: impl IntoIterator<Item = K>) -> Result<Arc<Self>, IndexSetError> {
        Ok(Arc::new(Self::new(keys)?))
    }

    /// Layer name lookup over an existing universe.
    #[must_use]
    pub fn from_set(inner: Arc<IndexSet<K>>) -> Self {
        let mut by_name = FxHashMap::default();
        by_name.reserve(inner.len());
        for (position, key) in inner.iter().enumerate() {
            by_name.insert(key.name().to_string(), position);
        }
        Self { inner, by_name }
    }

    /// The underlying universe, for building containers over the same keys.
    #[must_use]
    pub fn index_set(&self) -> &Arc<IndexSet<K>> {
        &self.inner
    }

    /// Key registered under `name`, if any.
    #[must_use]
    pub fn for_name(&self, name: &str) -> Option<&K> {
        self.name_position(name).and_then(|p| self.inner.get(p))
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Ordinal position of the key registered under `name`.
    #[must_use]
    pub fn name_position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// All registered names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl<K: Indexed + Named> Deref for NamedIndexSet<K> {
    type Target = IndexSet<K>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
