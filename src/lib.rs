//! In-memory ordered maps: an AVL tree and a B-tree, each with stateful
//! cursors that walk the live node graph in both directions.
//!
//! Neither structure is synchronized. Callers serialize access themselves;
//! cursors borrow the tree, so it cannot be mutated while one is alive.

mod arena;
pub mod avl_base;
pub mod binary_heap;
pub mod btree_base;
pub mod error;
pub mod iter;
mod macros;
pub mod snapshot;
pub mod tree_traits;

pub use avl_base::{iter::AvlIterator, tree::AvlTree};
pub use binary_heap::{BinaryHeap, HeapIterator};
pub use btree_base::{btree::BTree, iter::BTreeIterator, tree_stats::TreeStats};
pub use error::{SnapshotError, VerifyError};
pub use tree_traits::{Container, DefaultKeyComparator, KeyComparator, TreeIterator};
