//! Invariant checker used by tests and [`RbTree::assert_valid`](crate::RbTree::assert_valid).

use std::cmp::Ordering;

use crate::error::InvariantViolation;
use crate::types::{Colored, RbNodeLike};
use crate::util::{first, get_l, get_p, get_r, next};

/// Checks every red-black invariant of the tree rooted at `root`:
///
/// - the root has no parent and is black,
/// - every child points back at its parent,
/// - no red node has a red child,
/// - all paths from a node to an absent child carry the same number of black
///   nodes,
/// - the in-order sequence is non-decreasing under `comparator`.
///
/// Returns the black height of the tree (counting the root).
pub fn assert_red_black_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(0);
    };

    if get_p(arena, root).is_some() {
        return Err(InvariantViolation::RootHasParent { node: root });
    }
    if arena[root as usize].is_red() {
        return Err(InvariantViolation::RedRoot { node: root });
    }

    let height = black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            let cmp = comparator(arena[prev as usize].key(), arena[i as usize].key());
            if cmp == Ordering::Greater {
                return Err(InvariantViolation::OrderViolated { prev, node: i });
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(height)
}

fn black_height<N: Colored>(arena: &[N], node: Option<u32>) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };

    let l = get_l(arena, node);
    let r = get_r(arena, node);

    for child in [l, r].into_iter().flatten() {
        if get_p(arena, child) != Some(node) {
            return Err(InvariantViolation::BrokenParentLink { node, child });
        }
        if arena[node as usize].is_red() && arena[child as usize].is_red() {
            return Err(InvariantViolation::RedRedEdge {
                parent: node,
                child,
            });
        }
    }

    let left = black_height(arena, l)?;
    let right = black_height(arena, r)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { node, left, right });
    }

    Ok(left + usize::from(arena[node as usize].is_black()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, RbNode};
    use crate::util::tests::perfect_seven;

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn colored(colors: [Color; 7]) -> (Vec<RbNode<i32>>, u32) {
        let (mut arena, root) = perfect_seven();
        for (n, c) in arena.iter_mut().zip(colors) {
            n.color = c;
        }
        (arena, root)
    }

    use Color::{Black as B, Red as R};

    #[test]
    fn accepts_valid_tree() {
        let (arena, root) = colored([R, B, R, B, R, B, R]);
        assert_eq!(assert_red_black_tree(&arena, Some(root), &cmp), Ok(2));
        assert_eq!(assert_red_black_tree(&arena, None, &cmp), Ok(0));
    }

    #[test]
    fn rejects_red_root() {
        let (arena, root) = colored([B, B, B, R, B, B, B]);
        assert_eq!(
            assert_red_black_tree(&arena, Some(root), &cmp),
            Err(InvariantViolation::RedRoot { node: 3 })
        );
    }

    #[test]
    fn rejects_red_red_edge() {
        let (arena, root) = colored([R, R, R, B, B, B, B]);
        assert_eq!(
            assert_red_black_tree(&arena, Some(root), &cmp),
            Err(InvariantViolation::RedRedEdge {
                parent: 1,
                child: 0
            })
        );
    }

    #[test]
    fn rejects_black_height_mismatch() {
        let (arena, root) = colored([B, B, R, B, B, B, B]);
        assert_eq!(
            assert_red_black_tree(&arena, Some(root), &cmp),
            Err(InvariantViolation::BlackHeightMismatch {
                node: 1,
                left: 1,
                right: 0
            })
        );
    }

    #[test]
    fn rejects_broken_parent_link() {
        let (mut arena, root) = colored([R, B, R, B, R, B, R]);
        arena[4].p = Some(3);
        assert_eq!(
            assert_red_black_tree(&arena, Some(root), &cmp),
            Err(InvariantViolation::BrokenParentLink { node: 5, child: 4 })
        );
    }

    #[test]
    fn rejects_order_violation() {
        let (mut arena, root) = colored([R, B, R, B, R, B, R]);
        arena[0].k = 10;
        assert_eq!(
            assert_red_black_tree(&arena, Some(root), &cmp),
            Err(InvariantViolation::OrderViolated { prev: 0, node: 1 })
        );
    }
}
