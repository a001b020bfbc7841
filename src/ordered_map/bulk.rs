use core::cmp::Ordering;

use alloc::vec::Vec;

use super::OrderedMap;
use crate::raw::RawOrderedMap;
use crate::{Comparator, Error, Natural, Result};

impl<K: Ord, V> OrderedMap<K, V> {
    /// Builds a balanced map from entries in strictly ascending key order.
    ///
    /// Runs in O(n) and produces a tree of minimal height, unlike inserting
    /// the same entries one at a time, which builds a chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsorted`] with the index of the first entry whose
    /// key is not greater than its predecessor's. Duplicates count as
    /// unsorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Error, OrderedMap};
    ///
    /// let map = OrderedMap::from_sorted_vec((0..1023).map(|k| (k, k)).collect()).unwrap();
    /// assert_eq!(map.len(), 1023);
    /// assert_eq!(map.height(), 10);
    ///
    /// let err = OrderedMap::from_sorted_vec(vec![(1, ()), (3, ()), (2, ())]).unwrap_err();
    /// assert_eq!(err, Error::Unsorted { index: 2 });
    /// ```
    pub fn from_sorted_vec(entries: Vec<(K, V)>) -> Result<Self> {
        Self::from_sorted_vec_by(entries, Natural)
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Builds a balanced map ordered by `cmp` from entries that are strictly
    /// ascending under `cmp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsorted`] if the entries are not strictly ascending
    /// under `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osbst::{Natural, OrderedMap, Reverse};
    ///
    /// let map = OrderedMap::from_sorted_vec_by(vec![(3, 'c'), (2, 'b'), (1, 'a')], Reverse(Natural)).unwrap();
    /// assert_eq!(map.select(0), Ok(&3));
    /// ```
    pub fn from_sorted_vec_by(entries: Vec<(K, V)>, cmp: C) -> Result<Self> {
        if let Some(index) = entries
            .windows(2)
            .position(|pair| cmp.compare(&pair[0].0, &pair[1].0) != Ordering::Less)
        {
            let index = index + 1;
            tracing::debug!(index, len = entries.len(), "rejecting bulk load: keys not strictly ascending");
            return Err(Error::Unsorted { index });
        }

        tracing::trace!(len = entries.len(), "bulk-loading balanced tree");
        Ok(OrderedMap {
            raw: RawOrderedMap::from_ascending(entries),
            cmp,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_and_single_inputs_load() {
        let empty: OrderedMap<u8, u8> = OrderedMap::from_sorted_vec(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.height(), 0);

        let one = OrderedMap::from_sorted_vec(vec![(7, "seven")]).unwrap();
        assert_eq!(one.min(), Ok(&7));
        assert_eq!(one.height(), 1);
    }

    #[test]
    fn duplicate_keys_are_rejected_at_the_repeat() {
        let err = OrderedMap::from_sorted_vec(vec![(1, 'a'), (2, 'b'), (2, 'c')]).unwrap_err();
        assert_eq!(err, Error::Unsorted { index: 2 });
    }

    #[test]
    fn loaded_map_accepts_further_inserts() {
        let mut map = OrderedMap::from_sorted_vec((0..16).map(|k| (k * 2, ())).collect()).unwrap();
        assert_eq!(map.insert(15, ()), None);
        assert_eq!(map.rank(&15), 8);
        assert_eq!(map.select(8), Ok(&15));
        assert_eq!(map.len(), 17);
    }
}
