//! Order-statistic binary search tree map for Rust.
//!
//! This crate provides [`OrderedMap`], an ordered key-value map backed by a
//! binary search tree whose nodes carry subtree-size counters. Besides the
//! usual lookup and insertion it answers order-statistic queries:
//!
//! - [`select`](OrderedMap::select) - the key at a given sorted position
//! - [`rank`](OrderedMap::rank) - how many keys sort before a given key
//! - [`floor`](OrderedMap::floor) / [`ceiling`](OrderedMap::ceiling) - the
//!   nearest stored key at or below / at or above a probe
//! - [`min`](OrderedMap::min) / [`max`](OrderedMap::max) and extremal
//!   deletion via [`delete_min`](OrderedMap::delete_min) /
//!   [`delete_max`](OrderedMap::delete_max)
//!
//! # Example
//!
//! ```
//! use osbst::{Error, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.insert(key, key * 100);
//! }
//!
//! assert_eq!(map.len(), 7);
//! assert_eq!(map.get(&4), Some(&400));
//! assert_eq!(map.get(&6), None);
//!
//! assert_eq!(map.select(3), Ok(&5));
//! assert_eq!(map.rank(&7), 4);
//! assert_eq!(map.floor(&6), Ok(&5));
//! assert_eq!(map.ceiling(&6), Ok(&7));
//! assert_eq!(map.floor(&0), Err(Error::NoFloor));
//!
//! map.delete_min();
//! assert_eq!(map.min(), Ok(&3));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Pluggable ordering** - Any [`Comparator`], including closures and
//!   [`Reverse`], fixed at construction
//! - **No recursion on the hot path** - Every traversal uses an explicit
//!   stack, so degenerate trees cannot overflow the call stack
//!
//! # Implementation
//!
//! The tree is deliberately unbalanced: inserting keys in sorted order
//! produces a tree whose height equals its length, and every operation is
//! O(height). Use [`OrderedMap::from_sorted_vec`] to build a balanced tree
//! from data that is already sorted. Nodes live in an arena and refer to
//! their children by compact handles; each node stores the size of its
//! subtree, recomputed along the descent path after every mutation.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: Unsafe code is not needed; the arena hands out disjoint borrows.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod ordered_map;

pub use compare::{Comparator, Natural, Reverse};
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use ordered_map::OrderedMap;
