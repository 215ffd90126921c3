//! Recursive insert / remove / search shared by both tree flavors.
//!
//! Every mutating walk works on a slot (`&mut Link`) instead of on a node: a
//! level recurses into one child slot, then rebalances its own slot on the way
//! back up. Rotations rewrite the slot in place, so ancestors pick up height
//! changes without parent pointers.
//!
//! The flavors differ only in how a probe is ordered against a stored key,
//! which is abstracted by [`KeyOrder`]. All comparisons on a path run before
//! anything on that path is mutated, so a comparison error leaves the tree
//! exactly as it was.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::mem;

use crate::allocator::NodeAllocator;
use crate::comparable::Comparable;
use crate::error::Error;
use crate::node::{rebalance, AvlNode, Link};

/// Orders a probe `Q` against a stored key `K`.
pub(crate) trait KeyOrder<Q: ?Sized, K> {
    type Error;

    /// `Less` descends left, `Greater` descends right, `Equal` acts on the
    /// stored key.
    fn order(&self, probe: &Q, stored: &K) -> Result<Ordering, Self::Error>;
}

/// The key type's native total order.
pub(crate) struct TotalOrder;

impl<Q, K> KeyOrder<Q, K> for TotalOrder
where
    Q: Ord + ?Sized,
    K: Borrow<Q>,
{
    type Error = Infallible;

    #[inline]
    fn order(&self, probe: &Q, stored: &K) -> Result<Ordering, Infallible> {
        Ok(probe.cmp(stored.borrow()))
    }
}

/// The `less` / `greater` / `equal` capability of [`Comparable`] keys.
pub(crate) struct Capability;

impl<K: Comparable> KeyOrder<K, K> for Capability {
    type Error = Error;

    fn order(&self, probe: &K, stored: &K) -> Result<Ordering, Error> {
        if probe.less(stored)? {
            Ok(Ordering::Less)
        } else if probe.greater(stored)? {
            Ok(Ordering::Greater)
        } else if probe.equal(stored)? {
            Ok(Ordering::Equal)
        } else {
            Err(Error::Incomparable {
                probe: probe.kind(),
                stored: stored.kind(),
            })
        }
    }
}

#[inline]
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Insert `key`, or overwrite the value stored under an equal key. Returns
/// the previous value in the latter case.
pub(crate) fn insert<K, V, A, O>(
    link: &mut Link<K, V>,
    key: K,
    value: V,
    alloc: &A,
    order: &O,
) -> Result<Option<V>, O::Error>
where
    A: NodeAllocator<K, V>,
    O: KeyOrder<K, K>,
{
    let Some(node) = link.as_mut() else {
        *link = Some(alloc.allocate(key, value));
        return Ok(None);
    };

    let replaced = match order.order(&key, node.key())? {
        Ordering::Less => insert(node.left_mut(), key, value, alloc, order)?,
        Ordering::Greater => insert(node.right_mut(), key, value, alloc, order)?,
        Ordering::Equal => return Ok(Some(mem::replace(node.value_mut(), value))),
    };
    rebalance(link);
    Ok(replaced)
}

/// Remove the entry whose key is equal to `key`, returning it.
pub(crate) fn remove<K, V, Q, A, O>(
    link: &mut Link<K, V>,
    key: &Q,
    alloc: &A,
    order: &O,
) -> Result<Option<(K, V)>, O::Error>
where
    Q: ?Sized,
    A: NodeAllocator<K, V>,
    O: KeyOrder<Q, K>,
{
    let Some(node) = link.as_mut() else {
        return Ok(None);
    };

    let removed = match order.order(key, node.key())? {
        Ordering::Less => remove(node.left_mut(), key, alloc, order)?,
        Ordering::Greater => remove(node.right_mut(), key, alloc, order)?,
        Ordering::Equal => unlink(link, alloc),
    };
    if removed.is_some() {
        rebalance(link);
    }
    Ok(removed)
}

/// Take the node in `link` out of the tree structure and destroy it.
///
/// With two children the node itself stays in place: it receives the key and
/// value of its in-order successor, and the successor's record is the one
/// destroyed.
fn unlink<K, V, A>(link: &mut Link<K, V>, alloc: &A) -> Option<(K, V)>
where
    A: NodeAllocator<K, V>,
{
    let node = link.as_mut()?;
    if node.has_both_children() {
        if let Some(mut successor) = take_min(node.right_mut()) {
            let (key, value) = node.entry_mut();
            let (successor_key, successor_value) = successor.entry_mut();
            mem::swap(key, successor_key);
            mem::swap(value, successor_value);
            return Some(alloc.reclaim(successor));
        }
    }

    let mut node = link.take()?;
    let (left, right) = node.take_children();
    *link = left.or(right);
    Some(alloc.reclaim(node))
}

/// Detach the leftmost node of the subtree in `link`, rebalancing every level
/// it passes. The detached node has no children.
fn take_min<K, V>(link: &mut Link<K, V>) -> Link<K, V> {
    let node = link.as_mut()?;
    if node.left().is_some() {
        let min = take_min(node.left_mut());
        rebalance(link);
        return min;
    }

    let mut node = link.take()?;
    *link = node.right_mut().take();
    Some(node)
}

pub(crate) fn search<'a, K, V, Q, O>(
    root: Option<&'a AvlNode<K, V>>,
    key: &Q,
    order: &O,
) -> Result<Option<&'a AvlNode<K, V>>, O::Error>
where
    Q: ?Sized,
    O: KeyOrder<Q, K>,
{
    let mut current = root;
    while let Some(node) = current {
        current = match order.order(key, node.key())? {
            Ordering::Less => node.left(),
            Ordering::Greater => node.right(),
            Ordering::Equal => return Ok(Some(node)),
        };
    }
    Ok(None)
}

pub(crate) fn search_mut<'a, K, V, Q, O>(
    root: &'a mut Link<K, V>,
    key: &Q,
    order: &O,
) -> Result<Option<&'a mut AvlNode<K, V>>, O::Error>
where
    Q: ?Sized,
    O: KeyOrder<Q, K>,
{
    let mut current = root;
    while let Some(node) = current {
        match order.order(key, node.key())? {
            Ordering::Less => current = node.left_mut(),
            Ordering::Greater => current = node.right_mut(),
            Ordering::Equal => return Ok(Some(&mut **node)),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::Heap;
    use crate::node::height;

    fn build(keys: &[u32]) -> Link<u32, u32> {
        let mut root = None;
        for &k in keys {
            infallible(insert(&mut root, k, k * 10, &Heap, &TotalOrder));
        }
        root
    }

    fn in_order(node: Option<&AvlNode<u32, u32>>, out: &mut Vec<u32>) {
        if let Some(node) = node {
            in_order(node.left(), out);
            out.push(*node.key());
            in_order(node.right(), out);
        }
    }

    fn keys(link: &Link<u32, u32>) -> Vec<u32> {
        let mut out = Vec::new();
        in_order(link.as_deref(), &mut out);
        out
    }

    #[test]
    fn test_insert_ascending_stays_balanced() {
        let root = build(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(height(&root), 3);
        assert_eq!(root.as_ref().map(|n| *n.key()), Some(4));
        assert_eq!(keys(&root), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_insert_existing_replaces_value() {
        let mut root = build(&[2, 1, 3]);
        let old = infallible(insert(&mut root, 3, 99, &Heap, &TotalOrder));
        assert_eq!(old, Some(30));
        let node = infallible(search(root.as_deref(), &3, &TotalOrder)).unwrap();
        assert_eq!(*node.value(), 99);
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut root = build(&[2, 1, 3, 4]);
        assert_eq!(infallible(remove(&mut root, &4, &Heap, &TotalOrder)), Some((4, 40)));
        assert_eq!(keys(&root), vec![1, 2, 3]);

        infallible(insert(&mut root, 4, 40, &Heap, &TotalOrder));
        assert_eq!(infallible(remove(&mut root, &3, &Heap, &TotalOrder)), Some((3, 30)));
        assert_eq!(keys(&root), vec![1, 2, 4]);
    }

    #[test]
    fn test_remove_two_children_promotes_successor() {
        // 4 has children 2 and 6; its successor is 5.
        let mut root = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(infallible(remove(&mut root, &4, &Heap, &TotalOrder)), Some((4, 40)));
        let top = root.as_ref().unwrap();
        assert_eq!(*top.key(), 5);
        assert_eq!(*top.value(), 50);
        assert_eq!(keys(&root), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut root = build(&[2, 1, 3]);
        assert_eq!(infallible(remove(&mut root, &9, &Heap, &TotalOrder)), None);
        assert_eq!(keys(&root), vec![1, 2, 3]);
    }

    #[test]
    fn test_take_min_rebalances() {
        let mut root = build(&[4, 2, 6, 1, 3, 5, 7]);
        let min = take_min(&mut root).unwrap();
        assert_eq!(*min.key(), 1);
        assert!(min.left().is_none() && min.right().is_none());
        assert_eq!(keys(&root), vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(height(&root), 3);
    }

    #[test]
    fn test_search_mut() {
        let mut root = build(&[2, 1, 3]);
        let node = infallible(search_mut(&mut root, &1, &TotalOrder)).unwrap();
        *node.value_mut() = 11;
        let node = infallible(search(root.as_deref(), &1, &TotalOrder)).unwrap();
        assert_eq!(*node.value(), 11);
        assert!(infallible(search_mut(&mut root, &5, &TotalOrder)).is_none());
    }
}
