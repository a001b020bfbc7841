/// Errors reported by the fallible [`OrderedMap`](crate::OrderedMap) queries.
///
/// A missing key is never an error: lookups return [`Option`] instead, so a
/// stored default value can't be confused with an absent one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// `min` or `max` was called on an empty map.
    #[error("the map is empty")]
    Empty,
    /// `floor` found no stored key less than or equal to the probe.
    #[error("no key is less than or equal to the probe")]
    NoFloor,
    /// `ceiling` found no stored key greater than or equal to the probe.
    #[error("no key is greater than or equal to the probe")]
    NoCeiling,
    /// `select` was asked for a rank outside `0..len`.
    #[error("rank {rank} is out of range for a map of length {len}")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The map's length at the time of the call.
        len: usize,
    },
    /// A sorted bulk load found a key that does not strictly follow its
    /// predecessor.
    #[error("bulk-load input is not strictly ascending at index {index}")]
    Unsorted {
        /// Position of the first offending entry.
        index: usize,
    },
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
