use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type DefaultIx = u32;

/// Integer type used to address nodes inside a tree's arena.
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
    ($($t:ty),*) => {
        $(
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
        )*
    };
}

index_type!(u16, u32, u64, usize);

/// Handle of a node in a tree's arena.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
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

    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

/// Panics when `next` cannot be addressed by `Ix`.
///
/// `usize` arenas are bounded by the allocator instead.
#[inline]
pub(crate) fn assert_capacity<Ix: IndexType>(next: NodeIndex<Ix>) {
    assert!(
        <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != next,
        "Reached maximum number of nodes"
    );
}
