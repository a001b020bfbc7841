use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// One end of an in-order walk.
///
/// A cursor walking toward `Side::Left` yields keys in ascending order: it
/// keeps the left spine of the unvisited part on its stack and, after
/// yielding a node, pushes the left spine of that node's right subtree.
/// `Side::Right` is the mirror image and yields descending keys.
#[derive(Clone)]
pub(crate) struct Cursor {
    toward: Side,
    // Root of the subtree still to be primed; the spine is only built on
    // first use so an unused end costs nothing.
    pending: Option<Handle>,
    stack: SmallVec<[Handle; 16]>,
}

impl Cursor {
    pub(crate) fn new(root: Option<Handle>, toward: Side) -> Self {
        Self {
            toward,
            pending: root,
            stack: SmallVec::new(),
        }
    }

    pub(crate) fn next<K, V>(&mut self, nodes: &Arena<Node<K, V>>) -> Option<Handle> {
        if let Some(root) = self.pending.take() {
            self.descend(nodes, Some(root));
        }
        let handle = self.stack.pop()?;
        self.descend(nodes, nodes.get(handle).child(self.toward.opposite()));
        Some(handle)
    }

    fn descend<K, V>(&mut self, nodes: &Arena<Node<K, V>>, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = nodes.get(handle).child(self.toward);
        }
    }
}
