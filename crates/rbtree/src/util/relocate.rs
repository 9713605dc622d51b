use crate::types::Node;

use super::{get_l, get_p, get_r, replace_child, set_p};

/// Repoints every link that refers to slot `from` at slot `to`.
///
/// Used to keep an arena dense: after a node has been detached at `to`, the
/// node living in the last slot is relocated into the hole and the storage is
/// then moved with [`Vec::swap_remove`]. `to` must not be linked into the
/// tree. Returns the root after the move.
pub fn relocate<N: Node>(arena: &mut [N], root: Option<u32>, from: u32, to: u32) -> Option<u32> {
    if from == to {
        return root;
    }

    let p = get_p(arena, from);
    replace_child(arena, p, from, Some(to));
    if let Some(l) = get_l(arena, from) {
        set_p(arena, l, Some(to));
    }
    if let Some(r) = get_r(arena, from) {
        set_p(arena, r, Some(to));
    }

    if root == Some(from) {
        Some(to)
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RbNode;
    use crate::util::tests::perfect_seven;
    use crate::util::{first, next};

    fn keys(arena: &[RbNode<i32>], root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = next(arena, i);
        }
        out
    }

    #[test]
    fn relocate_last_slot_into_hole() {
        let (mut arena, root) = perfect_seven();
        arena[1].l = None;
        arena[0].p = None;
        let root = relocate(&mut arena, Some(root), 6, 0);
        let detached = arena.swap_remove(0);

        assert_eq!(detached.k, 1);
        assert_eq!(arena.len(), 6);
        assert_eq!(arena[5].r, Some(0));
        assert_eq!(arena[0].p, Some(5));
        assert_eq!(keys(&arena, root), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn relocate_root_there_and_back() {
        let (mut arena, root) = perfect_seven();
        arena[5].r = None;
        arena[6].p = None;

        let root = relocate(&mut arena, Some(root), 3, 6);
        arena.swap(3, 6);
        assert_eq!(root, Some(6));
        assert_eq!(arena[6].k, 4);
        assert_eq!(arena[1].p, Some(6));
        assert_eq!(arena[5].p, Some(6));

        let root = relocate(&mut arena, root, 6, 3);
        let detached = arena.swap_remove(3);
        assert_eq!(detached.k, 7);
        assert_eq!(root, Some(3));
        assert_eq!(keys(&arena, root), vec![1, 2, 3, 4, 5, 6]);
    }
}
