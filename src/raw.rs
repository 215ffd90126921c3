use std::iter::FusedIterator;

use log::debug;

use crate::allocator::NodeAllocator;
use crate::engine::{self, KeyOrder};
use crate::node::{self, AvlNode, Link};

/// Root, entry count and allocator shared by both tree flavors.
pub(crate) struct RawTree<K, V, A: NodeAllocator<K, V>> {
    root: Link<K, V>,
    len: usize,
    alloc: A,
}

impl<K, V, A: NodeAllocator<K, V>> RawTree<K, V, A> {
    pub(crate) fn new_in(alloc: A) -> Self {
        Self {
            root: None,
            len: 0,
            alloc,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn height(&self) -> u32 {
        node::height(&self.root)
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<&AvlNode<K, V>> {
        self.root.as_deref()
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(crate) fn insert<O>(&mut self, key: K, value: V, order: &O) -> Result<Option<V>, O::Error>
    where
        O: KeyOrder<K, K>,
    {
        let replaced = engine::insert(&mut self.root, key, value, &self.alloc, order)?;
        if replaced.is_none() {
            self.len += 1;
        }
        Ok(replaced)
    }

    pub(crate) fn remove<Q, O>(&mut self, key: &Q, order: &O) -> Result<Option<V>, O::Error>
    where
        Q: ?Sized,
        O: KeyOrder<Q, K>,
    {
        let removed = engine::remove(&mut self.root, key, &self.alloc, order)?;
        if removed.is_some() {
            self.len -= 1;
        }
        Ok(removed.map(|(_, value)| value))
    }

    pub(crate) fn search<Q, O>(&self, key: &Q, order: &O) -> Result<Option<&AvlNode<K, V>>, O::Error>
    where
        Q: ?Sized,
        O: KeyOrder<Q, K>,
    {
        engine::search(self.root.as_deref(), key, order)
    }

    pub(crate) fn search_mut<Q, O>(
        &mut self,
        key: &Q,
        order: &O,
    ) -> Result<Option<&mut AvlNode<K, V>>, O::Error>
    where
        Q: ?Sized,
        O: KeyOrder<Q, K>,
    {
        engine::search_mut(&mut self.root, key, order)
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, K, V> {
        Nodes::new(self.root.as_deref(), self.len)
    }

    pub(crate) fn first(&self) -> Option<&AvlNode<K, V>> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node)
    }

    pub(crate) fn last(&self) -> Option<&AvlNode<K, V>> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node)
    }

    pub(crate) fn clear(&mut self) {
        debug!("clearing tree of {} entries", self.len);
        self.release_all();
    }

    /// Hand every node back to the allocator, children first detached so the
    /// walk needs no recursion.
    fn release_all(&mut self) {
        let mut stack: Vec<Box<AvlNode<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            let (left, right) = node.take_children();
            stack.extend(left);
            stack.extend(right);
            self.alloc.reclaim(node);
        }
        self.len = 0;
    }
}

impl<K, V, A> Clone for RawTree<K, V, A>
where
    K: Clone,
    V: Clone,
    A: NodeAllocator<K, V> + Clone,
{
    fn clone(&self) -> Self {
        let alloc = self.alloc.clone();
        let root = clone_link(self.root.as_deref(), &alloc);
        Self {
            root,
            len: self.len,
            alloc,
        }
    }
}

fn clone_link<K, V, A>(node: Option<&AvlNode<K, V>>, alloc: &A) -> Link<K, V>
where
    K: Clone,
    V: Clone,
    A: NodeAllocator<K, V>,
{
    node.map(|node| {
        let mut copy = alloc.allocate(node.key().clone(), node.value().clone());
        copy.set_children(clone_link(node.left(), alloc), clone_link(node.right(), alloc));
        copy
    })
}

impl<K, V, A: NodeAllocator<K, V>> Drop for RawTree<K, V, A> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// In-order iterator over the nodes of a tree.
///
/// Holds the left spine of the part not yet visited, so memory is bounded by
/// the tree height.
pub struct Nodes<'a, K, V> {
    stack: Vec<&'a AvlNode<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Nodes<'a, K, V> {
    fn new(root: Option<&'a AvlNode<K, V>>, len: usize) -> Self {
        let mut nodes = Self {
            stack: Vec::new(),
            remaining: len,
        };
        nodes.push_left_spine(root);
        nodes
    }

    fn push_left_spine(&mut self, mut node: Option<&'a AvlNode<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a AvlNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Nodes<'_, K, V> {}

impl<K, V> FusedIterator for Nodes<'_, K, V> {}

/// In-order iterator over the entries of a tree.
pub struct Iter<'a, K, V> {
    nodes: Nodes<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: Nodes<'a, K, V>) -> Self {
        Self { nodes }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
