use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OrderedMap;
use crate::{Comparator, Error, Rank, Result};

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns the key at zero-based position `rank` in ascending order.
    ///
    /// The descent compares `rank` with the size of each node's left subtree,
    /// so it never inspects keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Error, OrderedMap};
    ///
    /// let map = OrderedMap::from([(30, 'c'), (10, 'a'), (20, 'b')]);
    /// assert_eq!(map.select(0), Ok(&10));
    /// assert_eq!(map.select(2), Ok(&30));
    /// assert_eq!(map.select(3), Err(Error::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K> {
        self.get_by_rank(rank).map(|(key, _)| key).ok_or(Error::RankOutOfRange { rank, len: self.len() })
    }

    /// Returns the key-value pair at position `rank` in sorted order, or
    /// `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 10), ("c", 30), ("b", 20)]);
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// break the map's ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(10, "a"), (5, "b")]);
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.node_mut(handle).key_value_mut())
    }

    /// Returns the number of stored keys strictly less than `key`.
    ///
    /// `key` does not have to be present. For a stored key this is its
    /// zero-based position, so `select(rank(k)) == k`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&5), 0);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.rank(key, &self.cmp).0
    }

    /// Returns the zero-based rank of `key`, or `None` if the key is not
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        match self.raw.rank(key, &self.cmp) {
            (rank, true) => Some(rank),
            (_, false) => None,
        }
    }

    /// Returns the largest stored key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFloor`] if every stored key is greater than `key`,
    /// which includes the empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Error, OrderedMap};
    ///
    /// let map = OrderedMap::from([(10, ()), (20, ())]);
    /// assert_eq!(map.floor(&15), Ok(&10));
    /// assert_eq!(map.floor(&20), Ok(&20));
    /// assert_eq!(map.floor(&5), Err(Error::NoFloor));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.floor_key_value(key).map(|(key, _)| key).ok_or(Error::NoFloor)
    }

    /// Returns the smallest stored key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCeiling`] if every stored key is less than `key`,
    /// which includes the empty map.
    pub fn ceiling<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.ceiling_key_value(key).map(|(key, _)| key).ok_or(Error::NoCeiling)
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    pub fn floor_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let node = self.raw.node(self.raw.floor(key, &self.cmp)?);
        Some((node.key(), node.value()))
    }

    /// Returns the entry with the smallest key greater than or equal to
    /// `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map = OrderedMap::from([("apple", 3), ("cherry", 7)]);
    /// assert_eq!(map.ceiling_key_value("banana"), Some((&"cherry", &7)));
    /// assert_eq!(map.ceiling_key_value("date"), None);
    /// ```
    pub fn ceiling_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let node = self.raw.node(self.raw.ceiling(key, &self.cmp)?);
        Some((node.key(), node.value()))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, V, C> Index<Rank> for OrderedMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osbst::{OrderedMap, Rank};
///
/// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
/// assert_eq!(map.get("b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for OrderedMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
