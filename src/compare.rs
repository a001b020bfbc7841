//! Key orderings for [`OrderedMap`](crate::OrderedMap).
//!
//! A map's comparator is fixed when the map is built. Anything implementing
//! [`Comparator`] works, including plain closures:
//!
//! ```
//! use osbst::OrderedMap;
//!
//! // Case-insensitive keys.
//! let mut map = OrderedMap::with_comparator(|a: &&str, b: &&str| {
//!     a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
//! });
//! map.insert("Bravo", 2);
//! map.insert("alpha", 1);
//! map.insert("ALPHA", 10);
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&"Alpha"), Some(&10));
//! ```

use core::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent: antisymmetric, transitive, and
/// returning `Equal` exactly for keys the map should treat as the same key.
/// A comparator that breaks these rules cannot cause undefined behavior, but
/// lookups and order statistics on the map become unspecified.
pub trait Comparator<T: ?Sized> {
    /// Compares `lhs` with `rhs`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The key type's own [`Ord`] order. This is the default comparator.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use osbst::{Comparator, Natural};
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
/// assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Reverses the order of the wrapped comparator.
///
/// # Examples
///
/// ```
/// use osbst::{Natural, OrderedMap, Reverse};
///
/// let mut map = OrderedMap::with_comparator(Reverse(Natural));
/// map.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self.0.compare(rhs, lhs)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}
