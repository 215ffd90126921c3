//! Node allocation strategies.
//!
//! Trees never call `Box::new` directly. Every node is created and destroyed
//! through a [`NodeAllocator`], so a tree can be switched between plain heap
//! allocation ([`Heap`]) and a shared recycling pool ([`PoolHandle`]) without
//! touching the balancing code.

use std::fmt;
use std::mem;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::Result;
use crate::node::AvlNode;
use crate::pool::{Pool, PoolConfig, PoolStats};

/// Creates and destroys tree nodes.
pub trait NodeAllocator<K, V> {
    /// Produce a leaf node (height 1, no children) holding `key` and `value`.
    fn allocate(&self, key: K, value: V) -> Box<AvlNode<K, V>>;

    /// Destroy a node that has already been unlinked from its tree and whose
    /// children have been detached, returning the entry it held.
    fn reclaim(&self, node: Box<AvlNode<K, V>>) -> (K, V);
}

/// Ordinary heap allocation: one `Box` per node, freed on removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heap;

impl<K, V> NodeAllocator<K, V> for Heap {
    #[inline]
    fn allocate(&self, key: K, value: V) -> Box<AvlNode<K, V>> {
        Box::new(AvlNode::new(key, value))
    }

    #[inline]
    fn reclaim(&self, node: Box<AvlNode<K, V>>) -> (K, V) {
        node.into_entry()
    }
}

pub type NodePool<K, V> = Pool<AvlNode<K, V>>;

/// Shared reference to a [`NodePool`].
///
/// Cloning the handle is cheap and every clone refers to the same pool, so
/// several trees can recycle nodes through one free list. The pool is freed
/// when the last handle is dropped.
pub struct PoolHandle<K, V> {
    inner: Arc<Mutex<NodePool<K, V>>>,
}

impl<K: Default, V: Default> PoolHandle<K, V> {
    pub fn new() -> Self {
        Self::from_pool(Pool::new())
    }

    pub fn with_config(config: PoolConfig) -> Result<Self> {
        Ok(Self::from_pool(Pool::with_config(config)?))
    }
}

impl<K, V> PoolHandle<K, V> {
    pub fn from_pool(pool: NodePool<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    pub fn idle(&self) -> usize {
        self.inner.lock().idle()
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }

    /// Lock the pool for direct inspection or maintenance.
    ///
    /// The lock is not reentrant. While the guard is held, any tree on this
    /// pool that adds, removes, clears or drops will block forever, so keep
    /// the guard scoped to the inspection.
    pub fn lock(&self) -> MutexGuard<'_, NodePool<K, V>> {
        self.inner.lock()
    }

    /// Whether both handles refer to the same pool.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: Default, V: Default> NodeAllocator<K, V> for PoolHandle<K, V> {
    fn allocate(&self, key: K, value: V) -> Box<AvlNode<K, V>> {
        let mut node = self.inner.lock().acquire();
        node.fill(key, value);
        node
    }

    fn reclaim(&self, mut node: Box<AvlNode<K, V>>) -> (K, V) {
        let (key, value) = node.entry_mut();
        let entry = (mem::take(key), mem::take(value));
        self.inner.lock().release(node);
        entry
    }
}

impl<K, V> Clone for PoolHandle<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Default, V: Default> Default for PoolHandle<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for PoolHandle<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PoolHandle");
        match self.inner.try_lock() {
            Some(pool) => s.field("idle", &pool.idle()).field("stats", &pool.stats()),
            None => s.field("pool", &format_args!("<locked>")),
        };
        s.finish()
    }
}
