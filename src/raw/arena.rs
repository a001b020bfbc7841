use alloc::vec::Vec;

use super::handle::Handle;

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    // Vacant slots form a LIFO free list threaded through the slab.
    Vacant(Option<Handle>),
}

/// Slab of tree nodes addressed by [`Handle`]. Freed slots are recycled before
/// the slab grows, so handles stay dense and small.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_free: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        // Vacant slots already count toward the room we need.
        let vacant = self.slots.len() - self.len;
        self.slots.reserve(additional.saturating_sub(vacant));
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let handle = if let Some(handle) = self.next_free {
            let slot = &mut self.slots[handle.index()];
            match core::mem::replace(slot, Slot::Occupied(element)) {
                Slot::Vacant(next) => self.next_free = next,
                Slot::Occupied(_) => panic!("`Arena::alloc()` - free list points at an occupied slot!"),
            }
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        };
        self.len += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is vacant!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.index()];
        match core::mem::replace(slot, Slot::Vacant(self.next_free)) {
            Slot::Occupied(element) => {
                self.next_free = Some(handle);
                self.len -= 1;
                element
            }
            Slot::Vacant(next) => {
                *slot = Slot::Vacant(next);
                panic!("`Arena::take()` - `handle` is vacant!")
            }
        }
    }

    /// Occupied slots in slab order, which has nothing to do with key order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied(element) => Some((Handle::from_index(index), element)),
            Slot::Vacant(_) => None,
        })
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.len = 0;
    }
}
