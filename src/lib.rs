//! `balanced_tree` provides two self-balancing binary search trees.
//!
//! [`AvlTree`] keeps the heights of sibling subtrees within one of each other,
//! repairing any imbalance with LL, RR, LR or RL rotations while an insertion
//! unwinds. [`RbTree`] colors its nodes red or black and restores the red-black
//! properties after an insertion by recoloring and rotating along the path
//! towards the root. Both guarantee O(logN) height whatever the insertion order.
//!
//! Like `interval_map`, the trees use arrays to simulate pointers: every node
//! lives in a vector and refers to its children (and, for the red-black tree,
//! its parent) by index. This keeps both trees `Send` and `Unpin`.
//!
//! Duplicate keys are ignored and neither tree supports removal.
//!
//! # Example
//!
//! ```rust
//! use balanced_tree::{AvlTree, Color, RbTree};
//!
//! let avl: AvlTree<_> = [26, 21, 30, 50, 60, 66, 68, 70].into_iter().collect();
//! assert_eq!(avl.root_key(), Some(&50));
//!
//! let rb: RbTree<_> = [3, 5, 8, 7, 15, 19, 18, 30, 33].into_iter().collect();
//! assert_eq!(rb.root_color(), Some(Color::Black));
//! assert_eq!(
//!     rb.iter().copied().collect::<Vec<_>>(),
//!     [3, 5, 7, 8, 15, 18, 19, 30, 33]
//! );
//! ```
//!

mod avl;
#[cfg(feature = "graphviz")]
mod dot;
mod index;
mod node;
mod rbtree;
mod traverse;

#[cfg(test)]
mod tests;

pub use avl::AvlTree;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use node::Color;
pub use rbtree::RbTree;
pub use traverse::{InOrder, PostOrder, PreOrder, Tree};
