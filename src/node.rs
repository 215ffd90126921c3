use std::fmt;

use log::trace;

use crate::pool::Erase;

pub(crate) type Link<K, V> = Option<Box<AvlNode<K, V>>>;

/// A single key/value record of the tree.
///
/// Nodes are exclusively owned by their parent (or by the tree, for the root).
/// Callers only ever see shared references obtained from a search or a
/// traversal.
#[derive(Default)]
pub struct AvlNode<K, V> {
    key: K,
    value: V,
    /// Counts nodes, not edges: a leaf has height 1. Only an erased pool
    /// record has height 0.
    height: u32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> AvlNode<K, V> {
    /// A detached leaf holding `key` and `value`, as a [`NodeAllocator`]
    /// must produce.
    ///
    /// [`NodeAllocator`]: crate::NodeAllocator
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Populate a blank (erased) record as a fresh leaf.
    pub(crate) fn fill(&mut self, key: K, value: V) {
        debug_assert!(self.left.is_none() && self.right.is_none());
        self.key = key;
        self.value = value;
        self.height = 1;
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn left(&self) -> Option<&AvlNode<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&AvlNode<K, V>> {
        self.right.as_deref()
    }

    /// Consume a detached node, returning its entry.
    pub fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    pub(crate) fn entry_mut(&mut self) -> (&mut K, &mut V) {
        (&mut self.key, &mut self.value)
    }

    pub(crate) fn left_mut(&mut self) -> &mut Link<K, V> {
        &mut self.left
    }

    pub(crate) fn right_mut(&mut self) -> &mut Link<K, V> {
        &mut self.right
    }

    /// Detach both children, leaving the node a leaf.
    pub(crate) fn take_children(&mut self) -> (Link<K, V>, Link<K, V>) {
        (self.left.take(), self.right.take())
    }

    /// Attach already balanced subtrees to a leaf and recompute its height.
    pub(crate) fn set_children(&mut self, left: Link<K, V>, right: Link<K, V>) {
        self.left = left;
        self.right = right;
        self.update_height();
    }

    pub(crate) fn has_both_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Height of the left subtree minus height of the right subtree.
    #[inline]
    fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

impl<K: Default, V: Default> Erase for AvlNode<K, V> {
    fn erase(&mut self) {
        self.key = K::default();
        self.value = V::default();
        self.height = 0;
        self.left = None;
        self.right = None;
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlNode<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlNode")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[inline]
pub(crate) fn height<K, V>(link: &Link<K, V>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_left<K, V>(mut node: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    trace!("rotate left: height {} -> pivot height {}", node.height, pivot.height);
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_right<K, V>(mut node: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    trace!("rotate right: height {} -> pivot height {}", node.height, pivot.height);
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Recompute the height of the node in `link` and restore the AVL condition
/// with at most two rotations. The slot is rewritten with the new subtree root.
pub(crate) fn rebalance<K, V>(link: &mut Link<K, V>) {
    let Some(mut node) = link.take() else {
        return;
    };
    node.update_height();

    let node = match node.balance_factor() {
        -2 => {
            // Right-left: straighten the right child first.
            if let Some(right) = node.right.take() {
                node.right = Some(if height(&right.left) > height(&right.right) {
                    rotate_right(right)
                } else {
                    right
                });
            }
            rotate_left(node)
        }
        2 => {
            if let Some(left) = node.left.take() {
                node.left = Some(if height(&left.right) > height(&left.left) {
                    rotate_left(left)
                } else {
                    left
                });
            }
            rotate_right(node)
        }
        _ => node,
    };
    *link = Some(node);
}
