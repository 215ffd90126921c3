use std::borrow::Borrow;
use std::fmt;

use crate::allocator::{Heap, NodeAllocator, PoolHandle};
use crate::builder::TreeBuilder;
use crate::engine::{infallible, TotalOrder};
use crate::node::AvlNode;
use crate::raw::{Iter, Nodes, RawTree};

/// AVL tree over keys with a native total order.
///
/// `A` decides where nodes come from: [`Heap`] allocates a `Box` per node,
/// [`PoolHandle`] recycles nodes through a shared [`Pool`](crate::Pool).
pub struct AvlTree<K, V, A: NodeAllocator<K, V> = Heap> {
    raw: RawTree<K, V, A>,
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self::new_in(Heap)
    }
}

impl<K: Ord + Default, V: Default> AvlTree<K, V, PoolHandle<K, V>> {
    pub fn builder() -> TreeBuilder<K, V> {
        TreeBuilder::new()
    }

    /// Create an empty tree that allocates and recycles its nodes through
    /// `pool`.
    pub fn with_memory_pool(pool: PoolHandle<K, V>) -> Self {
        Self::new_in(pool)
    }
}

impl<K: Ord, V, A: NodeAllocator<K, V>> AvlTree<K, V, A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            raw: RawTree::new_in(alloc),
        }
    }

    /// Insert `key`, or overwrite the value of an existing equal key and
    /// return the previous value.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        infallible(self.raw.insert(key, value, &TotalOrder))
    }

    /// Remove `key`, returning its value. Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        infallible(self.raw.remove(key, &TotalOrder))
    }

    /// Remove `old_key`, then insert `new_key` with `new_value`. The two steps
    /// are independent walks; the removed value (if any) is returned.
    pub fn update<Q>(&mut self, old_key: &Q, new_key: K, new_value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.remove(old_key);
        self.add(new_key, new_value);
        removed
    }

    pub fn search<Q>(&self, key: &Q) -> Option<&AvlNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        infallible(self.raw.search(key, &TotalOrder))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(AvlNode::value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        infallible(self.raw.search_mut(key, &TotalOrder)).map(AvlNode::value_mut)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }
}

impl<K, V, A: NodeAllocator<K, V>> AvlTree<K, V, A> {
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Height of the tree in nodes; `0` when empty.
    #[inline]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    pub fn root(&self) -> Option<&AvlNode<K, V>> {
        self.raw.root()
    }

    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.raw.nodes())
    }

    /// Nodes in ascending key order.
    pub fn nodes(&self) -> Nodes<'_, K, V> {
        self.raw.nodes()
    }

    /// Call `visit` on every node in ascending key order, stopping at the
    /// first error.
    pub fn visit_in_order<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(&AvlNode<K, V>) -> Result<(), E>,
    {
        self.raw.nodes().try_for_each(visit)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|node| (node.key(), node.value()))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|node| (node.key(), node.value()))
    }

    /// Remove every entry, returning each node to the allocator.
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, A> Clone for AvlTree<K, V, A>
where
    K: Clone,
    V: Clone,
    A: NodeAllocator<K, V> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, A: NodeAllocator<K, V>> fmt::Debug for AvlTree<K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V, A: NodeAllocator<K, V>> Extend<(K, V)> for AvlTree<K, V, A> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<'a, K, V, A: NodeAllocator<K, V>> IntoIterator for &'a AvlTree<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
