/// A zero-based position in the ascending key order of an
/// [`OrderedMap`](crate::OrderedMap), used to index the map by rank rather
/// than by key.
///
/// # Examples
///
/// ```
/// use osbst::{OrderedMap, Rank};
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// map[Rank(1)] += 1;
/// assert_eq!(map.get("b"), Some(&21));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
