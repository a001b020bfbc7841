use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::cursor::Cursor;
use super::handle::Handle;
use super::node::{Node, Side};
use super::size::Size;
use crate::Comparator;

/// The unbalanced, size-augmented binary search tree backing `OrderedMap`.
///
/// The comparator is owned by the caller and passed into every ordered
/// operation, so the tree itself never needs to know the key order.
#[derive(Clone)]
pub(crate) struct RawOrderedMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// One step of a descent: the node we were at and the link we followed.
struct PathElement {
    node: Handle,
    side: Side,
}

/// Descent record used to rebuild size counters while unwinding. Spills to
/// the heap for degenerate trees, so depth never touches the call stack.
type Path = SmallVec<[PathElement; 32]>;

impl<K, V> RawOrderedMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs, read off the root's counter.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root).to_usize()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn nodes(&self) -> &Arena<Node<K, V>> {
        &self.nodes
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn size_of(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |handle| self.nodes.get(handle).size())
    }

    /// Points the slot named by `parent` (or the root slot) at `child`.
    fn relink(&mut self, parent: Option<&PathElement>, child: Option<Handle>) {
        match parent {
            Some(elem) => self.nodes.get_mut(elem.node).set_child(elem.side, child),
            None => self.root = child,
        }
    }

    /// Recomputes every counter on `path`, deepest first, so no ancestor is
    /// left holding a stale size.
    fn resize_along(&mut self, path: &Path) {
        for elem in path.iter().rev() {
            let node = self.nodes.get(elem.node);
            let size = Size::of_children(self.size_of(node.left()), self.size_of(node.right()));
            self.nodes.get_mut(elem.node).set_size(size);
        }
    }

    /// Follows `side` links from the root to the extremal node.
    pub(crate) fn extreme(&self, side: Side) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(side) {
            current = next;
        }
        Some(current)
    }

    /// Splices out the extremal node on `side`. Its inner child takes its
    /// place at the bottom of the spine.
    pub(crate) fn pop_extreme(&mut self, side: Side) -> Option<(K, V)> {
        let mut current = self.root?;
        let mut path: Path = SmallVec::new();

        while let Some(next) = self.nodes.get(current).child(side) {
            path.push(PathElement { node: current, side });
            current = next;
        }

        let inner = self.nodes.get(current).child(side.opposite());
        self.relink(path.last(), inner);
        self.resize_along(&path);
        let entry = self.nodes.take(current).into_entry();

        if self.root.is_none() {
            debug_assert_eq!(self.nodes.len(), 0, "empty tree must not own live nodes");
            // Reclaim the slab once the last node is gone.
            self.nodes.clear();
        }

        Some(entry)
    }

    /// Returns the node holding the zero-based `rank`-th smallest key.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root;
        let mut remaining = rank;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left = self.size_of(node.left()).to_usize();
            match remaining.cmp(&left) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right();
                }
            }
        }

        // Unreachable while the size counters match the shape.
        None
    }

    /// Number of edges on the longest root-to-leaf path plus one; zero when
    /// empty.
    pub(crate) fn height(&self) -> usize {
        let mut stack: Vec<(Handle, usize)> = Vec::new();
        let mut height = 0;

        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    /// Cursor over the nodes in ascending (`Side::Left`) or descending
    /// (`Side::Right`) key order.
    pub(crate) fn cursor(&self, toward: Side) -> Cursor {
        Cursor::new(self.root, toward)
    }

    /// Handles of all nodes in ascending key order.
    fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = self.cursor(Side::Left);
        while let Some(handle) = cursor.next(&self.nodes) {
            order.push(handle);
        }
        order
    }

    /// Mutable access to every entry, in ascending key order.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order();
        let mut by_slot: Vec<Option<(&K, &mut V)>> = Vec::new();
        for (handle, node) in self.nodes.iter_mut() {
            let index = handle.index();
            if by_slot.len() <= index {
                by_slot.resize_with(index + 1, || None);
            }
            by_slot[index] = Some(node.key_value_mut());
        }

        order
            .into_iter()
            .filter_map(|handle| by_slot[handle.index()].take())
            .collect()
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    /// Runs in O(n) without touching any size counter.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut spine: Vec<Handle> = Vec::new();
        let mut current = self.root.take();

        loop {
            while let Some(handle) = current {
                spine.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = spine.pop() else {
                break;
            };
            // The left subtree is already drained; only the right link is live.
            let node = self.nodes.take(handle);
            current = node.right();
            entries.push(node.into_entry());
        }

        self.nodes.clear();
        entries
    }

    /// Builds a perfectly balanced tree from entries already known to be in
    /// strictly ascending key order.
    pub(crate) fn from_ascending(entries: Vec<(K, V)>) -> Self {
        let len = entries.len();
        let mut nodes = Arena::with_capacity(len);
        for (index, (key, value)) in entries.into_iter().enumerate() {
            let handle = nodes.alloc(Node::new(key, value));
            debug_assert_eq!(handle.index(), index, "fresh arena must hand out dense handles");
        }

        let root = Self::link_balanced(&mut nodes, 0, len);
        Self { nodes, root }
    }

    // Recursion depth is logarithmic in `hi - lo`.
    fn link_balanced(nodes: &mut Arena<Node<K, V>>, lo: usize, hi: usize) -> Option<Handle> {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        let left = Self::link_balanced(nodes, lo, mid);
        let right = Self::link_balanced(nodes, mid + 1, hi);

        let handle = Handle::from_index(mid);
        let node = nodes.get_mut(handle);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, right);
        node.set_size(Size::from_usize(hi - lo));
        Some(handle)
    }
}

impl<K, V> RawOrderedMap<K, V> {
    /// Finds the node whose key compares equal to `key`.
    pub(crate) fn search<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match cmp.compare(key, node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => current = node.right(),
            }
        }
        None
    }

    /// Inserts a key-value pair, returning the old value if the key was
    /// already present. A replaced value leaves the shape and every counter
    /// untouched.
    pub(crate) fn insert<C>(&mut self, key: K, value: V, cmp: &C) -> Option<V>
    where
        C: Comparator<K>,
    {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            let side = match cmp.compare(&key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Some(core::mem::replace(node.value_mut(), value)),
            };
            path.push(PathElement { node: handle, side });
            current = node.child(side);
        }

        let leaf = self.nodes.alloc(Node::new(key, value));
        self.relink(path.last(), Some(leaf));
        self.resize_along(&path);
        None
    }

    /// Largest key `<= key`.
    ///
    /// A node greater than the probe is never a candidate. A node less than
    /// the probe is, and it stays the answer unless its right subtree holds
    /// something closer.
    pub(crate) fn floor<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match cmp.compare(key, node.key().borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => current = node.left(),
                Ordering::Greater => {
                    best = Some(handle);
                    current = node.right();
                }
            }
        }

        best
    }

    /// Smallest key `>= key`; the mirror image of [`Self::floor`].
    pub(crate) fn ceiling<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match cmp.compare(key, node.key().borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => {
                    best = Some(handle);
                    current = node.left();
                }
                Ordering::Greater => current = node.right(),
            }
        }

        best
    }

    /// Counts the keys strictly less than `key`, and reports whether `key`
    /// itself is stored.
    pub(crate) fn rank<Q, C>(&self, key: &Q, cmp: &C) -> (usize, bool)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut rank = 0;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left = self.size_of(node.left()).to_usize();
            match cmp.compare(key, node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return (rank + left, true),
                Ordering::Greater => {
                    rank += left + 1;
                    current = node.right();
                }
            }
        }

        (rank, false)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
mod tests {
    use super::*;
    use crate::{Natural, Reverse};
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use proptest::prelude::*;

    impl<K: Ord, V> RawOrderedMap<K, V> {
        /// Checks ordering, size consistency and reachability. Panics with
        /// every violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let mut reachable = 0usize;

            // (node, exclusive lower bound, exclusive upper bound)
            let mut stack: Vec<(Handle, Option<&K>, Option<&K>)> = Vec::new();
            if let Some(root) = self.root {
                stack.push((root, None, None));
            }

            while let Some((handle, lower, upper)) = stack.pop() {
                reachable += 1;
                let node = self.nodes.get(handle);
                let key = node.key();

                if lower.is_some_and(|lower| lower >= key) || upper.is_some_and(|upper| upper <= key) {
                    errors.push(format!("ordering violated at {handle:?}"));
                }

                let expected = Size::of_children(self.size_of(node.left()), self.size_of(node.right()));
                if node.size() != expected {
                    errors.push(format!(
                        "size mismatch at {handle:?}: stored={}, computed={}",
                        node.size().to_usize(),
                        expected.to_usize()
                    ));
                }

                if let Some(left) = node.left() {
                    stack.push((left, lower, Some(key)));
                }
                if let Some(right) = node.right() {
                    stack.push((right, Some(key), upper));
                }
            }

            if reachable != self.nodes.len() {
                errors.push(format!("{} nodes allocated but {reachable} reachable", self.nodes.len()));
            }
            if reachable != self.len() {
                errors.push(format!("root size {} but {reachable} reachable", self.len()));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn keys(&self) -> Vec<&K> {
            self.in_order().into_iter().map(|handle| self.node(handle).key()).collect()
        }
    }

    fn tree_of(keys: &[i32]) -> RawOrderedMap<i32, i32> {
        let mut tree = RawOrderedMap::new();
        for &key in keys {
            tree.insert(key, key * 10, &Natural);
        }
        tree
    }

    fn key_at(tree: &RawOrderedMap<i32, i32>, handle: Option<Handle>) -> Option<i32> {
        handle.map(|handle| *tree.node(handle).key())
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..400).prop_map(Op::Insert),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawOrderedMap<i32, i32> = RawOrderedMap::new();
            let mut model: BTreeMap<i32, i32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key, key * 2, &Natural), model.insert(key, key * 2));
                    }
                    Op::PopFirst => prop_assert_eq!(tree.pop_extreme(Side::Left), model.pop_first()),
                    Op::PopLast => prop_assert_eq!(tree.pop_extreme(Side::Right), model.pop_last()),
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }
        }

        #[test]
        fn select_and_rank_agree_with_sorted_keys(keys in prop::collection::vec(-500i32..500, 1..200)) {
            let tree = tree_of(&keys);
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            sorted.dedup();

            for (rank, key) in sorted.iter().enumerate() {
                prop_assert_eq!(key_at(&tree, tree.select(rank)), Some(*key));
                prop_assert_eq!(tree.rank(key, &Natural), (rank, true));
            }
            prop_assert_eq!(tree.select(sorted.len()), None);
        }

        #[test]
        fn rank_of_absent_key_counts_smaller_keys(keys in prop::collection::vec(-500i32..500, 0..200), probe in -600i32..600) {
            let tree = tree_of(&keys);
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            sorted.dedup();

            let smaller = sorted.iter().filter(|&&key| key < probe).count();
            prop_assert_eq!(tree.rank(&probe, &Natural), (smaller, sorted.binary_search(&probe).is_ok()));
        }

        #[test]
        fn floor_and_ceiling_match_linear_scan(keys in prop::collection::vec(-500i32..500, 0..200), probe in -600i32..600) {
            let tree = tree_of(&keys);

            let floor = keys.iter().copied().filter(|&key| key <= probe).max();
            let ceiling = keys.iter().copied().filter(|&key| key >= probe).min();
            prop_assert_eq!(key_at(&tree, tree.floor(&probe, &Natural)), floor);
            prop_assert_eq!(key_at(&tree, tree.ceiling(&probe, &Natural)), ceiling);
        }

        #[test]
        fn balanced_build_is_valid_and_shallow(len in 0usize..2000) {
            let tree = RawOrderedMap::from_ascending((0..len as i32).map(|key| (key, key)).collect());
            tree.validate_invariants();
            prop_assert_eq!(tree.len(), len);

            // ceil(log2(len + 1))
            let optimal = (usize::BITS - len.leading_zeros()) as usize;
            prop_assert_eq!(tree.height(), optimal);
        }
    }

    #[test]
    fn empty_tree_queries() {
        let mut tree: RawOrderedMap<i32, i32> = RawOrderedMap::new();
        tree.validate_invariants();

        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.extreme(Side::Left), None);
        assert_eq!(tree.extreme(Side::Right), None);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.rank(&5, &Natural), (0, false));
        assert_eq!(tree.floor(&5, &Natural), None);
        assert_eq!(tree.ceiling(&5, &Natural), None);
        assert_eq!(tree.pop_extreme(Side::Left), None);
        assert_eq!(tree.pop_extreme(Side::Right), None);
        assert!(tree.drain_to_vec().is_empty());
    }

    #[test]
    fn reference_tree_shape_and_statistics() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        tree.validate_invariants();

        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);
        assert_eq!(key_at(&tree, tree.select(0)), Some(1));
        assert_eq!(key_at(&tree, tree.select(3)), Some(5));
        assert_eq!(tree.rank(&7, &Natural), (4, true));
        assert_eq!(key_at(&tree, tree.floor(&6, &Natural)), Some(5));
        assert_eq!(key_at(&tree, tree.ceiling(&6, &Natural)), Some(7));

        assert_eq!(tree.pop_extreme(Side::Left), Some((1, 10)));
        tree.validate_invariants();
        assert_eq!(key_at(&tree, tree.extreme(Side::Left)), Some(3));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn duplicate_insert_replaces_value_only() {
        let mut tree = tree_of(&[5, 3, 8]);
        let before: Vec<_> = [3, 5, 8].iter().map(|key| tree.rank(key, &Natural)).collect();

        assert_eq!(tree.insert(3, 333, &Natural), Some(30));
        tree.validate_invariants();

        let after: Vec<_> = [3, 5, 8].iter().map(|key| tree.rank(key, &Natural)).collect();
        assert_eq!(before, after);
        assert_eq!(tree.len(), 3);
        let handle = tree.search(&3, &Natural).expect("key 3 is present");
        assert_eq!(*tree.node(handle).value(), 333);
    }

    #[test]
    fn pop_extreme_promotes_inner_child() {
        // 1 is the minimum and has a right subtree {2, 3}.
        let mut tree = tree_of(&[5, 1, 3, 2, 7]);
        assert_eq!(tree.pop_extreme(Side::Left), Some((1, 10)));
        tree.validate_invariants();
        assert_eq!(tree.keys(), [&2, &3, &5, &7]);

        // 7 is the maximum and has a left subtree {6}.
        let mut tree = tree_of(&[5, 7, 6]);
        assert_eq!(tree.pop_extreme(Side::Right), Some((7, 70)));
        tree.validate_invariants();
        assert_eq!(tree.keys(), [&5, &6]);
    }

    #[test]
    fn popping_root_only_tree_resets_arena() {
        let mut tree = tree_of(&[1]);
        assert_eq!(tree.pop_extreme(Side::Right), Some((1, 10)));
        assert!(tree.is_empty());
        assert_eq!(tree.nodes.len(), 0);
        tree.validate_invariants();
    }

    #[test]
    fn reverse_comparator_flips_the_order() {
        let mut tree = RawOrderedMap::new();
        let cmp = Reverse(Natural);
        for key in [5, 3, 8, 1] {
            tree.insert(key, (), &cmp);
        }
        assert_eq!(tree.keys(), [&8, &5, &3, &1]);
        assert_eq!(tree.rank(&3, &cmp), (2, true));
        // Under the reversed order the floor of 4 is the next larger key.
        assert_eq!(tree.floor(&4, &cmp).map(|h| *tree.node(h).key()), Some(5));
    }

    #[test]
    fn sorted_insertion_degenerates_without_recursion() {
        const N: i32 = 10_000;
        let mut tree = RawOrderedMap::new();
        for key in 0..N {
            tree.insert(key, (), &Natural);
        }

        assert_eq!(tree.len(), N as usize);
        assert_eq!(tree.height(), N as usize);
        assert_eq!(tree.select(N as usize - 1).map(|h| *tree.node(h).key()), Some(N - 1));
        assert_eq!(tree.rank(&(N - 1), &Natural), (N as usize - 1, true));
        assert_eq!(tree.pop_extreme(Side::Right), Some((N - 1, ())));
        assert_eq!(tree.len(), N as usize - 1);

        let drained = tree.drain_to_vec();
        assert_eq!(drained.len(), N as usize - 1);
        assert!(drained.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn entries_mut_follow_key_order() {
        let mut tree = tree_of(&[5, 3, 8, 1]);
        let _ = tree.pop_extreme(Side::Left);
        tree.insert(2, 20, &Natural);

        for (rank, (_, value)) in tree.entries_mut().into_iter().enumerate() {
            *value = rank as i32;
        }
        let values: Vec<_> = tree.in_order().into_iter().map(|h| *tree.node(h).value()).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
        assert_eq!(tree.keys(), [&2, &3, &5, &8]);
    }
}
