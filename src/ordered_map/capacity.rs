use super::OrderedMap;
use crate::Natural;
use crate::raw::RawOrderedMap;

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map with room for at least `capacity` nodes before
    /// the node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = OrderedMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            raw: RawOrderedMap::with_capacity(capacity),
            cmp: Natural,
        }
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns the number of nodes the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// map.reserve(10);
    /// assert!(map.capacity() >= 11);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Shrinks the node arena as much as possible.
    ///
    /// Slots freed by `pop_first`/`pop_last` stay reserved for reuse until
    /// the map is emptied, so this only releases trailing spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }
}
