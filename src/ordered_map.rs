//! An ordered map with order-statistic queries, backed by an unbalanced
//! binary search tree.
//!
//! [`OrderedMap`] is the map type; the other items here are its iterators.
//!
//! ```
//! use osbst::ordered_map::{Keys, OrderedMap};
//!
//! let map = OrderedMap::from([(2, 'b'), (1, 'a')]);
//! let keys: Keys<'_, i32, char> = map.keys();
//! assert_eq!(keys.copied().collect::<Vec<_>>(), [1, 2]);
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{Cursor, RawOrderedMap, Side};
use crate::{Comparator, Error, Natural, Result};

mod bulk;
mod capacity;
mod order_statistic;

pub use crate::Rank;

/// An ordered map based on an order-statistic [binary search tree].
///
/// Keys are kept in the order defined by the map's [`Comparator`], which is
/// fixed at construction and defaults to the key type's [`Ord`] order
/// ([`Natural`]). Every node caches the number of nodes below it, so besides
/// lookup the map answers order-statistic queries: the key at a given rank
/// ([`select`]), the rank of a key ([`rank`]), and the nearest keys around a
/// probe ([`floor`], [`ceiling`]).
///
/// The tree is not self-balancing. Every operation costs O(height), and the
/// height can reach `len()` when keys arrive in sorted order. No operation
/// recurses over the tree, so such inputs are slow but never overflow the
/// stack. Data that is already sorted can be loaded into a balanced tree with
/// [`from_sorted_vec`].
///
/// Only the minimum and maximum can be removed ([`pop_first`], [`pop_last`]);
/// there is no removal of arbitrary keys.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the comparator,
/// changes while it is in the map. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `OrderedMap` that
/// observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use osbst::OrderedMap;
///
/// let mut ratings = OrderedMap::new();
/// ratings.insert("Heat", 83);
/// ratings.insert("Alien", 98);
/// ratings.insert("Ronin", 68);
///
/// // Absent keys are `None`, never a default value.
/// assert_eq!(ratings.get("Heat"), Some(&83));
/// assert_eq!(ratings.get("Tenet"), None);
///
/// // Order statistics over the keys.
/// assert_eq!(ratings.select(0), Ok(&"Alien"));
/// assert_eq!(ratings.rank("Ronin"), 2);
/// assert_eq!(ratings.ceiling("B"), Ok(&"Heat"));
///
/// for (movie, rating) in &ratings {
///     println!("{movie}: {rating}");
/// }
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [`select`]: OrderedMap::select
/// [`rank`]: OrderedMap::rank
/// [`floor`]: OrderedMap::floor
/// [`ceiling`]: OrderedMap::ceiling
/// [`from_sorted_vec`]: OrderedMap::from_sorted_vec
/// [`pop_first`]: OrderedMap::pop_first
/// [`pop_last`]: OrderedMap::pop_last
pub struct OrderedMap<K, V, C = Natural> {
    raw: RawOrderedMap<K, V>,
    cmp: C,
}

/// An iterator over the entries of an `OrderedMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedMap`].
///
/// # Examples
///
/// ```
/// use osbst::OrderedMap;
///
/// let map = OrderedMap::from([(2, "b"), (1, "a"), (3, "c")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&3, &"c")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OrderedMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: Option<&'a RawOrderedMap<K, V>>,
    front: Cursor,
    back: Cursor,
    remaining: usize,
}

/// A mutable iterator over the entries of an `OrderedMap`, in key order.
///
/// This `struct` is created by the [`iter_mut`] method on [`OrderedMap`].
///
/// [`iter_mut`]: OrderedMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

/// An owning iterator over the entries of an `OrderedMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`OrderedMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of an `OrderedMap`.
///
/// This `struct` is created by the [`keys`] method on [`OrderedMap`].
///
/// [`keys`]: OrderedMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `OrderedMap`.
///
/// This `struct` is created by the [`values`] method on [`OrderedMap`].
///
/// [`values`]: OrderedMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of an `OrderedMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`OrderedMap`].
///
/// [`values_mut`]: OrderedMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An owning iterator over the keys of an `OrderedMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`OrderedMap`].
///
/// [`into_keys`]: OrderedMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `OrderedMap`.
///
/// This `struct` is created by the [`into_values`] method on [`OrderedMap`].
///
/// [`into_values`]: OrderedMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap` ordered by the keys' [`Ord`] order.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Makes a new, empty `OrderedMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Natural, OrderedMap, Reverse};
    ///
    /// let mut map = OrderedMap::with_comparator(Reverse(Natural));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.min(), Ok(&2));
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            raw: RawOrderedMap::new(),
            cmp,
        }
    }

    /// Returns a reference to the map's comparator.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the map.
    ///
    /// This is the size counter of the root node, so it is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        tracing::trace!(len = self.len(), "clearing ordered map");
        self.raw.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or zero for an empty map.
    ///
    /// This is an extension; it exposes how far the tree is from balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// // Sorted insertion builds a chain.
    /// let chain: OrderedMap<_, _> = (0..8).map(|k| (k, ())).collect();
    /// assert_eq!(chain.height(), 8);
    ///
    /// let bushy: OrderedMap<_, _> = [4, 2, 6, 1, 3, 5, 7].map(|k| (k, ())).into();
    /// assert_eq!(bushy.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the first key-value pair in the map, if any. The key is the
    /// minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.extreme(Side::Left)?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in the map, if any. The key is the
    /// maximum key in the map.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.extreme(Side::Right)?);
        Some((node.key(), node.value()))
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.min(), Err(Error::Empty));
    /// map.insert(3, ());
    /// map.insert(1, ());
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.first_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    pub fn max(&self) -> Result<&K> {
        self.last_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    /// Removes and returns the first element in the map. The key of this
    /// element is the minimum key that was in the map.
    ///
    /// The minimum's right subtree, if any, takes its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_extreme(Side::Left)
    }

    /// Removes and returns the last element in the map. The key of this
    /// element is the maximum key that was in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_extreme(Side::Right)
    }

    /// Removes the smallest key and its value. Does nothing on an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, ()> = OrderedMap::new();
    /// map.delete_min();
    /// assert!(map.is_empty());
    ///
    /// map.extend([(2, ()), (1, ()), (3, ())]);
    /// map.delete_min();
    /// assert_eq!(map.min(), Ok(&2));
    /// ```
    pub fn delete_min(&mut self) {
        self.raw.pop_extreme(Side::Left);
    }

    /// Removes the largest key and its value. Does nothing on an empty map.
    pub fn delete_max(&mut self) {
        self.raw.pop_extreme(Side::Right);
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: Some(&self.raw),
            front: self.raw.cursor(Side::Left),
            back: self.raw.cursor(Side::Right),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// The borrows are collected up front, so this allocates O(len).
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.get("b"), Some(&12));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.entries_mut().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "world"), (1, "hello")]);
    /// let values: Vec<&str> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello", "world"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    /// The map cannot be used after calling this.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    /// The map cannot be used after calling this.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, a new leaf is attached where
    /// the search for it ended, the size of every node on the way down grows
    /// by one, and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place
    /// and the old value is returned. The key is not updated and the shape of
    /// the tree does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value, &self.cmp)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key, or `None`
    /// if the key is absent.
    ///
    /// The key may be any borrowed form of the map's key type, as long as
    /// the comparator can compare that form.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 0);
    /// assert_eq!(map.get(&1), Some(&0));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key, &self.cmp)?;
        Some(self.raw.node(handle).value())
    }

    /// Returns the key-value pair corresponding to the supplied key. This is
    /// useful when the stored key differs from the probe in ways the
    /// comparator ignores.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let node = self.raw.node(self.raw.search(key, &self.cmp)?);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key, &self.cmp)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key, &self.cmp).is_some()
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: Hash, V: Hash, C> Hash for OrderedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for entry in self {
            entry.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    /// Creates an empty `OrderedMap` with the default comparator.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    /// Inserts the pairs one by one, in iteration order. Later duplicates
    /// overwrite earlier values.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K: Copy + 'a, V: Copy + 'a, C: Comparator<K>> Extend<(&'a K, &'a V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    /// Converts a `[(K, V); N]` into an `OrderedMap` ordered by [`Natural`],
    /// inserting in array order. For another comparator, build the map with
    /// [`OrderedMap::with_comparator`] and [`extend`](Extend::extend) it.
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map1 = OrderedMap::from([(1, 2), (3, 4)]);
    /// let map2: OrderedMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let entries: Vec<_> = map.into_iter().collect();
    /// assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    fn into_iter(mut self) -> Self::IntoIter {
        tracing::trace!(len = self.len(), "draining ordered map");
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

/// Looks up a value by key.
///
/// # Panics
///
/// Panics if the key is not present in the `OrderedMap`.
impl<K, Q, V, C> Index<&Q> for OrderedMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let node = raw.node(self.front.next(raw.nodes())?);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let node = raw.node(self.back.next(raw.nodes())?);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `Iter`.
    ///
    /// ```
    /// use osbst::ordered_map;
    ///
    /// let iter: ordered_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            raw: None,
            front: Cursor::new(None, Side::Left),
            back: Cursor::new(None, Side::Right),
            remaining: 0,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> Default for IterMut<'_, K, V> {
    fn default() -> Self {
        IterMut {
            inner: alloc::vec::IntoIter::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::IntoIter::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys {
            inner: Iter::default(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a V> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values {
            inner: Iter::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a mut V> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> Default for ValuesMut<'_, K, V> {
    fn default() -> Self {
        ValuesMut {
            inner: IterMut::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, value)| value)).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Default for IntoKeys<K, V> {
    fn default() -> Self {
        IntoKeys {
            inner: IntoIter::default(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(key, _)| key)).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V> Default for IntoValues<K, V> {
    fn default() -> Self {
        IntoValues {
            inner: IntoIter::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, value)| value)).finish()
    }
}
