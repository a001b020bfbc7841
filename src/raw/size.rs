use super::handle::RawHandle;

/// Number of nodes in a subtree. Shares the handle width, since a tree can
/// never hold more nodes than the arena can address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(RawHandle);

impl Size {
    pub(crate) const MAX: usize = RawHandle::MAX as usize;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(size as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn of_children(left: Self, right: Self) -> Self {
        Self::from_usize(left.to_usize() + right.to_usize() + 1)
    }
}
