use core::fmt;
use core::ops::Index;

use crate::comparator::{Comparator, Natural};
use crate::error::{Result, TreeError, Violation};
use crate::raw::{Order, RawRBTree};

mod capacity;
mod traversal;

/// An ordered map based on a [red-black tree].
///
/// Every key maps to exactly one value and keys are kept in the total order
/// defined by the map's [`Comparator`] (by default [`Natural`], the key's own
/// [`Ord`]). Lookups, insertions and deletions take O(log n) time because the
/// tree never grows deeper than `2 * log2(n + 1)`.
///
/// Unlike [`BTreeMap`](alloc::collections::BTreeMap), inserting a key that is
/// already present is an error rather than an overwrite, and deleting or
/// searching for a missing key reports [`TreeError::KeyNotFound`]. A failed call
/// never changes the map.
///
/// Nodes live in a single arena and refer to each other by index, so the map
/// contains no `unsafe` code. The map owns its values: they are dropped when
/// their entry is deleted, when the map is cleared, or when the map itself is
/// dropped, each exactly once. To keep a value alive past its entry, store a
/// shared pointer such as [`Rc`](alloc::rc::Rc) and clone it out.
///
/// # Examples
///
/// ```
/// use rbtree_map::{RBTreeMap, TreeError};
///
/// let mut planets = RBTreeMap::new();
/// planets.insert(3, "Earth").unwrap();
/// planets.insert(1, "Mercury").unwrap();
/// planets.insert(2, "Venus").unwrap();
///
/// assert_eq!(planets.size(), 3);
/// assert_eq!(planets.search(&2), Ok(&"Venus"));
/// assert_eq!(planets.insert(2, "Venus again"), Err(TreeError::DuplicateKey));
///
/// planets.delete(&1).unwrap();
/// assert!(!planets.contains(&1));
/// assert_eq!(planets.delete(&1), Err(TreeError::KeyNotFound));
///
/// assert_eq!(planets.inorder(), [(&2, &"Venus"), (&3, &"Earth")]);
/// assert!(planets.validate());
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = Natural> {
    raw: RawRBTree<K, V, C>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RBTreeMap {
            raw: RawRBTree::new(Natural),
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` that orders keys with `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// map.insert("ccc", 3).unwrap();
    /// map.insert("a", 1).unwrap();
    /// assert!(map.insert("b", 2).is_err()); // same length as "a"
    /// assert_eq!(map.keys(), [&"a", &"ccc"]);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RBTreeMap {
            raw: RawRBTree::new(comparator),
        }
    }

    /// Returns the comparator that orders this map.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of entries in the map.
    ///
    /// The count is maintained by every insertion and deletion, so this is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.size(), 0);
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.size(), 1);
    /// ```
    #[must_use]
    pub const fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of entries in the map. Same as [`size`](Self::size).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry, dropping each value once.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Number of nodes on the longest path from the root to a leaf.
    ///
    /// Never exceeds `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Number of black nodes on every path from the root to a leaf.
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.raw.black_height()
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Inserts a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateKey`] if the key is already present. The
    /// existing entry is kept and the rejected key and value are dropped.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most two rotations.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::{RBTreeMap, TreeError};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(TreeError::DuplicateKey));
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.raw.insert(key, value).map(|_| ())
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not present. A stored
    /// value is always found, whatever its contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::{RBTreeMap, TreeError};
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, 0).unwrap();
    /// assert_eq!(map.search(&1), Ok(&0));
    /// assert_eq!(map.search(&2), Err(TreeError::KeyNotFound));
    /// ```
    pub fn search(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Returns a reference to the value for `key`, or `None` if it is absent.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.find(key).map(|h| self.raw.entry(h))
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, 10)]);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(map[&1], 11);
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.find(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Deletes the entry for `key` and returns its value.
    ///
    /// Dropping the returned value releases the map's hold on it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not present; the map is
    /// left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most three rotations.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::{RBTreeMap, TreeError};
    ///
    /// let mut map = RBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.delete(&1), Ok("a"));
    /// assert_eq!(map.delete(&1), Err(TreeError::KeyNotFound));
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<V> {
        self.remove(key).ok_or(TreeError::KeyNotFound)
    }

    /// Removes the entry for `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove_entry(key)
    }

    /// Walks the whole tree and returns `true` if every red-black invariant holds.
    ///
    /// Checks strict key order, a black root, no red node with a red child,
    /// equal black heights below every node, consistent parent links, and the
    /// entry count. Meant for tests and debugging.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Like [`validate`](Self::validate), but reports which invariant failed first.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found.
    pub fn check(&self) -> core::result::Result<(), Violation> {
        self.raw.check()
    }

    /// Builds a map from `iter` ordered by `comparator`. For duplicate keys the
    /// first entry wins.
    pub fn from_iter_with_comparator<I>(iter: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RBTreeMap::with_comparator(comparator);
        map.extend(iter);
        map
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.raw.walk(Order::In).into_iter().map(|h| self.raw.entry(h)))
            .finish()
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.inorder() == other.inorder()
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

/// Collects entries in iteration order; for duplicate keys the first entry wins.
impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RBTreeMap::from_iter_with_comparator(iter, C::default())
    }
}

/// Inserts entries in iteration order, skipping keys that are already present.
impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if self.insert(key, value).is_err() {
                log::debug!("extend skipped a duplicate key");
            }
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for RBTreeMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
