use crate::types::Node;

use super::{get_l, get_p, get_r, replace_child, set_l, set_p, set_r};

/// Exchanges the tree positions of nodes `x` and `y`.
///
/// Both nodes keep their arena slots (and payloads); only links move, and
/// colors are not touched. Returns the root after the swap.
///
/// Deletion only ever swaps a node with its in-order predecessor, which is
/// either its left child or lies deeper in its left subtree. The general
/// cases (siblings, unrelated nodes, either argument order) work as well.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let [xp, xl, xr] = links(arena, x);
    let [yp, yl, yr] = links(arena, y);

    // A link naming one of the pair must name the other afterwards.
    let flip = |i: Option<u32>| match i {
        Some(i) if i == x => Some(y),
        Some(i) if i == y => Some(x),
        other => other,
    };

    // Parent slots, rewritten while they still name the original nodes.
    match (xp, yp) {
        (Some(p), Some(q)) if p == q => {
            let (l, r) = (get_l(arena, p), get_r(arena, p));
            set_l(arena, p, r);
            set_r(arena, p, l);
        }
        _ => {
            if xp != Some(y) {
                replace_child(arena, xp, x, Some(y));
            }
            if yp != Some(x) {
                replace_child(arena, yp, y, Some(x));
            }
        }
    }

    for c in [xl, xr].into_iter().flatten().filter(|&c| c != y) {
        set_p(arena, c, Some(y));
    }
    for c in [yl, yr].into_iter().flatten().filter(|&c| c != x) {
        set_p(arena, c, Some(x));
    }

    set_links(arena, x, [flip(yp), flip(yl), flip(yr)]);
    set_links(arena, y, [flip(xp), flip(xl), flip(xr)]);

    match (xp, yp) {
        (None, _) => y,
        (_, None) => x,
        _ => root,
    }
}

fn links<N: Node>(arena: &[N], i: u32) -> [Option<u32>; 3] {
    [get_p(arena, i), get_l(arena, i), get_r(arena, i)]
}

fn set_links<N: Node>(arena: &mut [N], i: u32, [p, l, r]: [Option<u32>; 3]) {
    set_p(arena, i, p);
    set_l(arena, i, l);
    set_r(arena, i, r);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RbNode;
    use crate::util::tests::perfect_seven;
    use crate::util::{first, next};

    fn assert_links(arena: &[RbNode<i32>], root: u32) {
        assert_eq!(arena[root as usize].p, None);
        for (i, n) in arena.iter().enumerate() {
            for c in [n.l, n.r].into_iter().flatten() {
                assert_eq!(arena[c as usize].p, Some(i as u32), "child {c} of {i}");
            }
            if let Some(p) = n.p {
                let p = &arena[p as usize];
                assert!(p.l == Some(i as u32) || p.r == Some(i as u32), "parent of {i}");
            }
        }
    }

    fn slots_in_order(arena: &[RbNode<i32>], root: u32) -> Vec<u32> {
        let mut out = Vec::new();
        let mut curr = first(arena, Some(root));
        while let Some(i) = curr {
            out.push(i);
            curr = next(arena, i);
        }
        out
    }

    #[test]
    fn swap_with_itself_is_noop() {
        let (mut arena, root) = perfect_seven();
        assert_eq!(swap(&mut arena, root, 2, 2), root);
        assert_links(&arena, root);
    }

    #[test]
    fn swap_parent_with_left_child() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 1, 0);
        assert_eq!(root, 3);
        assert_eq!(arena[3].l, Some(0));
        assert_eq!(arena[0].l, Some(1));
        assert_eq!(arena[0].r, Some(2));
        assert_eq!(arena[1].l, None);
        assert_links(&arena, root);
        assert_eq!(slots_in_order(&arena, root), vec![1, 0, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn swap_child_with_parent_argument_order() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 6, 5);
        assert_links(&arena, root);
        assert_eq!(slots_in_order(&arena, root), vec![0, 1, 2, 3, 4, 6, 5]);
    }

    #[test]
    fn swap_root_with_predecessor() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 3, 2);
        assert_eq!(root, 2);
        assert_eq!(arena[2].l, Some(1));
        assert_eq!(arena[1].r, Some(3));
        assert_links(&arena, root);
        assert_eq!(slots_in_order(&arena, root), vec![0, 1, 3, 2, 4, 5, 6]);
    }

    #[test]
    fn swap_root_with_direct_child() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 3, 5);
        assert_eq!(root, 5);
        assert_eq!(arena[5].r, Some(3));
        assert_eq!(arena[3].l, Some(4));
        assert_eq!(arena[3].r, Some(6));
        assert_links(&arena, root);
    }

    #[test]
    fn swap_siblings() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 0, 2);
        assert_eq!(arena[1].l, Some(2));
        assert_eq!(arena[1].r, Some(0));
        assert_links(&arena, root);
    }

    #[test]
    fn swap_distant_nodes() {
        let (mut arena, root) = perfect_seven();
        let root = swap(&mut arena, root, 0, 6);
        assert_eq!(arena[1].l, Some(6));
        assert_eq!(arena[5].r, Some(0));
        assert_links(&arena, root);
        assert_eq!(slots_in_order(&arena, root), vec![6, 1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn swapping_any_pair_twice_restores_links() {
        let (original, root) = perfect_seven();
        let snapshot: Vec<_> = original.iter().map(|n| (n.p, n.l, n.r)).collect();
        for x in 0..7 {
            for y in 0..7 {
                let mut arena = original.clone();
                let swapped = swap(&mut arena, root, x, y);
                assert_links(&arena, swapped);
                let restored = swap(&mut arena, swapped, x, y);
                assert_eq!(restored, root, "swap {x} <-> {y}");
                let after: Vec<_> = arena.iter().map(|n| (n.p, n.l, n.r)).collect();
                assert_eq!(after, snapshot, "swap {x} <-> {y}");
            }
        }
    }
}
