//! Owning ordered container over the arena algorithms.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::InvariantViolation;
use crate::insert::{insert, insert_left, insert_right};
use crate::print::print;
use crate::remove::remove;
use crate::types::{Color, Colored, Node, RbNode};
use crate::util::{
    find, find_or_next_higher, find_or_next_lower, height, next, prev, relocate, root_of,
};
use crate::validate::assert_red_black_tree;

/// Handle to a node of an [`RbTree`].
///
/// Handles stay valid across insertions. Any removal invalidates every
/// handle obtained before it. Stale handles, and handles issued by another
/// tree, are rejected by the accessors and by [`RbTree::delete`] as if the
/// node were absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: u32,
    epoch: u64,
}

impl NodeId {
    /// Arena slot of the node.
    pub fn index(self) -> u32 {
        self.index
    }
}

/// Red-black tree ordered container.
///
/// Keys are kept in a dense arena: the arena always holds exactly
/// [`len`](RbTree::len) nodes. Duplicate keys are allowed; equal keys are
/// ordered by insertion.
pub struct RbTree<K> {
    tree: u64,
    arena: Vec<RbNode<K>>,
    root: Option<u32>,
    min: Option<u32>,
    max: Option<u32>,
    epoch: u64,
}

static NEXT_TREE: AtomicU64 = AtomicU64::new(0);

fn key_of<K>(n: &RbNode<K>) -> &K {
    &n.k
}

impl<K: Ord> RbTree<K> {
    pub fn new() -> Self {
        Self {
            tree: NEXT_TREE.fetch_add(1, Ordering::Relaxed),
            arena: Vec::new(),
            root: None,
            min: None,
            max: None,
            epoch: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    fn id(&self, index: u32) -> NodeId {
        NodeId {
            tree: self.tree,
            index,
            epoch: self.epoch,
        }
    }

    fn resolve(&self, id: NodeId) -> Option<u32> {
        let live = id.tree == self.tree && id.epoch == self.epoch;
        (live && (id.index as usize) < self.arena.len()).then_some(id.index)
    }

    /// Inserts `key` and returns its handle.
    ///
    /// Keys at or beyond the current extremes are attached next to the cached
    /// min / max node without a descent.
    pub fn insert(&mut self, key: K) -> NodeId {
        let idx = u32::try_from(self.arena.len()).expect("arena index fits in u32");
        let Some(root) = self.root else {
            self.arena.push(RbNode::new(key));
            self.root = insert(&mut self.arena, None, idx, &K::cmp);
            self.min = self.root;
            self.max = self.root;
            return self.id(idx);
        };

        let min = self.min.expect("non-empty tree caches its minimum");
        let max = self.max.expect("non-empty tree caches its maximum");
        let after_max = key >= self.arena[max as usize].k;
        let before_min = key < self.arena[min as usize].k;
        self.arena.push(RbNode::new(key));

        let root = if after_max {
            self.max = Some(idx);
            insert_right(&mut self.arena, root, idx, max)
        } else if before_min {
            self.min = Some(idx);
            insert_left(&mut self.arena, root, idx, min)
        } else {
            insert(&mut self.arena, Some(root), idx, &K::cmp).expect("non-empty tree has a root")
        };
        self.root = Some(root);
        debug_assert_eq!(root_of(&self.arena, idx), root);
        self.id(idx)
    }

    /// Exact lookup. With duplicates, any one of the equal nodes is returned.
    pub fn search(&self, key: &K) -> Option<NodeId> {
        find(&self.arena, self.root, key, key_of, K::cmp).map(|i| self.id(i))
    }

    /// Node holding `key`, or the smallest key greater than it.
    pub fn best_fit(&self, key: &K) -> Option<NodeId> {
        find_or_next_higher(&self.arena, self.root, key, key_of, K::cmp).map(|i| self.id(i))
    }

    /// Node holding `key`, or the largest key less than it.
    pub fn floor(&self, key: &K) -> Option<NodeId> {
        find_or_next_lower(&self.arena, self.root, key, key_of, K::cmp).map(|i| self.id(i))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Removes one node holding `key` and returns the key.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let id = self.search(key)?;
        self.delete(id)
    }

    /// Removes the node behind `id` and returns its key; `None` for a stale
    /// or foreign handle.
    pub fn delete(&mut self, id: NodeId) -> Option<K> {
        let node = self.resolve(id)?;

        if self.min == Some(node) {
            self.min = next(&self.arena, node);
        }
        if self.max == Some(node) {
            self.max = prev(&self.arena, node);
        }

        let mut root = remove(&mut self.arena, self.root, node);

        // Fill the hole with the last slot so the arena stays dense.
        let last_slot = (self.arena.len() - 1) as u32;
        if last_slot != node {
            root = relocate(&mut self.arena, root, last_slot, node);
            for cached in [&mut self.min, &mut self.max] {
                if *cached == Some(last_slot) {
                    *cached = Some(node);
                }
            }
        }
        let removed = self.arena.swap_remove(node as usize);

        self.root = root;
        self.epoch += 1;
        Some(removed.into_key())
    }

    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.resolve(id).map(|i| &self.arena[i as usize].k)
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.resolve(id).map(|i| self.arena[i as usize].color())
    }

    pub fn first(&self) -> Option<NodeId> {
        self.min.map(|i| self.id(i))
    }

    pub fn last(&self) -> Option<NodeId> {
        self.max.map(|i| self.id(i))
    }

    /// In-order successor of `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let i = self.resolve(id)?;
        next(&self.arena, i).map(|i| self.id(i))
    }

    /// In-order predecessor of `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let i = self.resolve(id)?;
        prev(&self.arena, i).map(|i| self.id(i))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root.map(|i| self.id(i))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path, in nodes.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    /// Black nodes on any root-to-leaf path, counting the root.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = &self.arena[i as usize];
            count += usize::from(n.is_black());
            curr = n.l();
        }
        count
    }

    /// Calls `visit` once per key in ascending order.
    pub fn traverse_inorder<F: FnMut(&K)>(&self, mut visit: F) {
        self.visit_inorder(self.root, &mut visit);
    }

    fn visit_inorder<F: FnMut(&K)>(&self, node: Option<u32>, visit: &mut F) {
        if let Some(i) = node {
            let n = &self.arena[i as usize];
            self.visit_inorder(n.l(), visit);
            visit(&n.k);
            self.visit_inorder(n.r(), visit);
        }
    }

    /// Lazy in-order iterator over the keys. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            front: self.min,
            back: self.max,
            remaining: self.arena.len(),
        }
    }

    /// Releases every node in post-order and returns how many were freed.
    /// The tree is empty and reusable afterwards.
    pub fn destroy(&mut self) -> usize {
        let mut freed = 0;
        let mut stack: Vec<(u32, bool)> = self.root.into_iter().map(|r| (r, false)).collect();
        while let Some((i, children_done)) = stack.pop() {
            let n = &mut self.arena[i as usize];
            if children_done {
                n.set_p(None);
                freed += 1;
                continue;
            }
            stack.push((i, true));
            let (l, r) = (n.l.take(), n.r.take());
            stack.extend(r.into_iter().chain(l).map(|c| (c, false)));
        }
        debug_assert_eq!(freed, self.arena.len());
        debug!(freed, "destroyed red-black tree");
        self.clear();
        freed
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.min = None;
        self.max = None;
        self.epoch += 1;
    }

    /// Checks every structural invariant; returns the black height.
    pub fn assert_valid(&self) -> Result<usize, InvariantViolation> {
        assert_red_black_tree(&self.arena, self.root, &K::cmp)
    }
}

impl<K: Ord + fmt::Debug> RbTree<K> {
    /// Multi-line dump of the tree shape with colors.
    pub fn dump(&self) -> String {
        print(&self.arena, self.root, "")
    }
}

impl<K: Ord> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Ord> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator returned by [`RbTree::iter`].
pub struct Iter<'a, K> {
    arena: &'a [RbNode<K>],
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.remaining -= 1;
        self.front = next(self.arena, i);
        Some(&self.arena[i as usize].k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.remaining -= 1;
        self.back = prev(self.arena, i);
        Some(&self.arena[i as usize].k)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_extremes_follow_inserts_and_deletes() {
        let mut tree: RbTree<i32> = [5, 3, 7].into_iter().collect();
        assert_eq!(tree.first().and_then(|id| tree.get(id)), Some(&3));
        assert_eq!(tree.last().and_then(|id| tree.get(id)), Some(&7));

        tree.insert(1);
        tree.insert(9);
        assert_eq!(tree.first().and_then(|id| tree.get(id)), Some(&1));
        assert_eq!(tree.last().and_then(|id| tree.get(id)), Some(&9));

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.remove(&9), Some(9));
        assert_eq!(tree.first().and_then(|id| tree.get(id)), Some(&3));
        assert_eq!(tree.last().and_then(|id| tree.get(id)), Some(&7));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn arena_stays_dense_after_delete() {
        let mut tree: RbTree<i32> = (0..10).collect();
        tree.remove(&0);
        tree.remove(&4);
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.arena.len(), 8);
        for (i, n) in tree.arena.iter().enumerate() {
            for c in [n.l, n.r].into_iter().flatten() {
                assert_eq!(tree.arena[c as usize].p, Some(i as u32));
            }
        }
        tree.assert_valid().unwrap();
    }

    #[test]
    fn handles_go_stale_after_removal() {
        let mut tree: RbTree<i32> = (0..4).collect();
        let three = tree.search(&3).unwrap();
        assert_eq!(tree.get(three), Some(&3));

        tree.insert(10);
        assert_eq!(tree.get(three), Some(&3));

        assert_eq!(tree.remove(&0), Some(0));
        assert_eq!(tree.get(three), None);
        assert_eq!(tree.delete(three), None);
        assert!(tree.contains(&3));
    }

    #[test]
    fn handles_from_another_tree_are_rejected() {
        let a: RbTree<i32> = (0..10).collect();
        let mut b: RbTree<i32> = (100..110).collect();
        let foreign = a.search(&3).unwrap();

        assert_eq!(b.get(foreign), None);
        assert_eq!(b.color(foreign), None);
        assert_eq!(b.next(foreign), None);
        assert_eq!(b.delete(foreign), None);
        assert_eq!(b.len(), 10);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), (100..110).collect::<Vec<_>>());
        assert_eq!(a.get(foreign), Some(&3));
    }

    #[test]
    fn destroy_frees_every_node() {
        let mut tree: RbTree<i32> = (0..100).collect();
        assert_eq!(tree.destroy(), 100);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.destroy(), 0);

        tree.insert(1);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1]);
    }
}
