use std::fmt;
use std::hash::Hash;

pub type DefaultIx = u32;

/// Integer types usable as arena indices.
///
/// # Safety
///
/// `new` and `index` must round-trip every value in `0..=max().index()`.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! index_type {
    ($($t:ty),*) => {$(
        unsafe impl IndexType for $t {
            #[inline(always)]
            fn new(x: usize) -> Self {
                x as $t
            }
            #[inline(always)]
            fn index(&self) -> usize {
                *self as usize
            }
            #[inline(always)]
            fn max() -> Self {
                <$t>::MAX
            }
        }
    )*};
}

index_type!(u16, u32, u64, usize);

/// Handle to a node slot in the tree's arena.
///
/// Slot zero is reserved for the sentinel and is never handed out.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// One past the last usable slot.
    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }

    #[inline]
    pub(crate) fn sentinel() -> Self {
        NodeIndex::new(0)
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self.index() == 0
    }

    /// `None` for the sentinel, the handle otherwise.
    #[inline]
    pub(crate) fn linked(self) -> Option<Self> {
        (!self.is_sentinel()).then_some(self)
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
