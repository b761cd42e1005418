//! `rbtree_arena` is an ordered container based on a red-black tree.
//!
//! It implements insertion, lookup and deletion with the classic red-black
//! fixups, so the height of a tree holding `n` keys never exceeds
//! `2 * log2(n + 1)` and every modification takes O(logN) time.
//!
//! Nodes are stored in an array and linked by index instead of by pointer.
//! Slot zero is a black sentinel that stands for every absent child and for
//! the parent of the root. `insert` hands out a [`NodeIndex`] that keeps
//! naming the same node until it is passed to `remove`, so keys that compare
//! equal stay individually addressable.
//!
//! Keys are ordered by a [`Compare`] strategy stored in the tree: the
//! natural order of `K: Ord` by default, or any `Fn(&K, &K) -> Ordering`.
//! It must be a total order. Keys that compare equal are all kept, the
//! later one placed after the earlier ones.
//!
//! # Example
//!
//! ```rust
//! use rbtree_arena::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [10, 20, 5, 15, 25, 1] {
//!     tree.insert(k);
//! }
//! let node = tree.find(&15).unwrap();
//! assert_eq!(tree.remove(node), Some(15));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 5, 10, 20, 25]);
//! ```
//!
//! # Features
//!
//! - `graphviz`: render a snapshot of the tree as a Graphviz `graph`.

#[cfg(feature = "graphviz")]
mod dot;
mod index;
mod iter;
mod node;
mod rbtree;


pub use compare::{Compare, Natural};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter, NodeRef, Preorder};
pub use node::Color;
pub use rbtree::RbTree;
