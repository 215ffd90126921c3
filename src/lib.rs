//! # avltree
//!
//! Self-balancing (AVL) binary search trees with optional node recycling.
//!
//! Two flavors share one balancing engine:
//!
//! - [`AvlTree`] orders keys by their [`Ord`] implementation.
//! - [`UnrestrictedAvlTree`] orders keys through the [`Comparable`]
//!   capability, whose `less` / `greater` / `equal` relations may compare
//!   different key shapes. Stored ranges can be searched with a point, which
//!   turns the tree into an interval lookup (see [`geometry`]).
//!
//! Either flavor can allocate nodes from the heap ([`Heap`], the default) or
//! recycle them through a shared [`Pool`] via a [`PoolHandle`]. Removed nodes
//! are erased before they are reused.
//!
//! ## Example
//!
//! ```rust
//! use avltree::AvlTree;
//!
//! let mut tree: AvlTree<u32, &str> = AvlTree::new();
//! for key in [3, 2, 4, 1, 5] {
//!     tree.add(key, "x");
//! }
//! tree.remove(&2);
//! tree.update(&5, 6, "six");
//!
//! let keys: Vec<u32> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 3, 4, 6]);
//! assert_eq!(tree.get(&6), Some(&"six"));
//! ```
//!
//! ## Interval lookup
//!
//! ```rust
//! use avltree::geometry::Geometric;
//! use avltree::UnrestrictedAvlTree;
//!
//! let mut tree = UnrestrictedAvlTree::new();
//! tree.add(Geometric::range(0.0, 1.0)?, "low")?;
//! tree.add(Geometric::range(2.0, 3.0)?, "high")?;
//!
//! assert_eq!(tree.get(&Geometric::point(2.5))?, Some(&"high"));
//! assert_eq!(tree.get(&Geometric::point(1.5))?, None);
//! # Ok::<(), avltree::Error>(())
//! ```
//!
//! ## Pooled nodes
//!
//! ```rust
//! use avltree::{AvlTree, PoolConfig, PoolHandle};
//!
//! let pool = PoolHandle::with_config(PoolConfig::new().initial_len(64))?;
//! let mut tree = AvlTree::builder().with_memory_pool(pool.clone()).build()?;
//! tree.add(1u64, 10u64);
//! tree.remove(&1);
//! assert_eq!(pool.idle(), 64);
//! # Ok::<(), avltree::Error>(())
//! ```
//!
//! Trees are plain single-owner values with no internal locking. Share one
//! between threads by wrapping it in a lock.

mod allocator;
mod builder;
mod comparable;
mod engine;
mod error;
pub mod geometry;
mod node;
mod ordered;
mod pool;
mod raw;
mod unrestricted;

pub use allocator::{Heap, NodeAllocator, NodePool, PoolHandle};
pub use builder::TreeBuilder;
pub use comparable::Comparable;
pub use error::{Error, Result};
pub use node::AvlNode;
pub use ordered::AvlTree;
pub use pool::{Erase, Pool, PoolConfig, PoolStats};
pub use raw::{Iter, Nodes};
pub use unrestricted::UnrestrictedAvlTree;

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod proptests;
