use std::fmt;

use crate::allocator::{Heap, NodeAllocator, PoolHandle};
use crate::builder::TreeBuilder;
use crate::comparable::Comparable;
use crate::engine::Capability;
use crate::error::Result;
use crate::node::AvlNode;
use crate::raw::{Iter, Nodes, RawTree};

/// AVL tree over [`Comparable`] keys.
///
/// Shares its balancing algorithm with [`AvlTree`](crate::AvlTree). Every
/// comparison can fail, so every keyed operation returns a [`Result`]; a
/// failed operation leaves the tree as it was.
pub struct UnrestrictedAvlTree<K, V, A: NodeAllocator<K, V> = Heap> {
    raw: RawTree<K, V, A>,
}

impl<K: Comparable, V> UnrestrictedAvlTree<K, V> {
    pub fn new() -> Self {
        Self::new_in(Heap)
    }
}

impl<K: Comparable + Default, V: Default> UnrestrictedAvlTree<K, V, PoolHandle<K, V>> {
    pub fn builder() -> TreeBuilder<K, V> {
        TreeBuilder::new()
    }

    pub fn with_memory_pool(pool: PoolHandle<K, V>) -> Self {
        Self::new_in(pool)
    }
}

impl<K: Comparable, V, A: NodeAllocator<K, V>> UnrestrictedAvlTree<K, V, A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            raw: RawTree::new_in(alloc),
        }
    }

    /// Insert `key`, or overwrite the value stored under a key it compares
    /// equal to and return the previous value. The stored key is kept.
    pub fn add(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.raw.insert(key, value, &Capability)
    }

    /// Remove the entry whose key compares equal to `key`.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        self.raw.remove(key, &Capability)
    }

    /// Remove `old_key`, then insert `new_key`. The walks are independent: if
    /// the insertion fails, the removal has already happened.
    pub fn update(&mut self, old_key: &K, new_key: K, new_value: V) -> Result<Option<V>> {
        let removed = self.remove(old_key)?;
        self.add(new_key, new_value)?;
        Ok(removed)
    }

    /// Find the node whose key compares equal to `key`. The probe may be a
    /// different shape than the stored keys, e.g. a point searched among
    /// ranges.
    pub fn search(&self, key: &K) -> Result<Option<&AvlNode<K, V>>> {
        self.raw.search(key, &Capability)
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        Ok(self.search(key)?.map(AvlNode::value))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>> {
        Ok(self.raw.search_mut(key, &Capability)?.map(AvlNode::value_mut))
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.search(key)?.is_some())
    }
}

impl<K, V, A: NodeAllocator<K, V>> UnrestrictedAvlTree<K, V, A> {
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

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

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.raw.nodes())
    }

    pub fn nodes(&self) -> Nodes<'_, K, V> {
        self.raw.nodes()
    }

    pub fn visit_in_order<E, F>(&self, visit: F) -> std::result::Result<(), E>
    where
        F: FnMut(&AvlNode<K, V>) -> std::result::Result<(), E>,
    {
        self.raw.nodes().try_for_each(visit)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|node| (node.key(), node.value()))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|node| (node.key(), node.value()))
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Comparable, V> Default for UnrestrictedAvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, A> Clone for UnrestrictedAvlTree<K, V, A>
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

impl<K: fmt::Debug, V: fmt::Debug, A: NodeAllocator<K, V>> fmt::Debug
    for UnrestrictedAvlTree<K, V, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, A: NodeAllocator<K, V>> IntoIterator for &'a UnrestrictedAvlTree<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
