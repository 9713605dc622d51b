//! Insertion: BST descent, red-leaf attach, fixup.

use std::cmp::Ordering;

use tracing::trace;

use crate::rotate::{rotate_left, rotate_right};
use crate::types::{Color, Colored, RbNodeLike};
use crate::util::{get_l, get_p, get_r, set_color, set_l, set_p, set_r};

/// Inserts the detached node `n` into the tree rooted at `root`.
///
/// Keys comparing [`Ordering::Less`] descend left, everything else descends
/// right, so equal keys land after the ones already present. Returns the new
/// root.
pub fn insert<K, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> Option<u32>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(top) = root else {
        detach(arena, n);
        set_color(arena, n, Color::Black);
        return Some(n);
    };
    let mut curr = top;

    loop {
        let less =
            comparator(arena[n as usize].key(), arena[curr as usize].key()) == Ordering::Less;
        let next = if less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match next {
            Some(next) => curr = next,
            None if less => return Some(insert_left(arena, top, n, curr)),
            None => return Some(insert_right(arena, top, n, curr)),
        }
    }
}

/// Attaches `n` as the left child of `parent`, whose left slot must be empty,
/// and rebalances. `root` is the current root; the new root is returned.
///
/// The caller is responsible for `n` belonging there in key order.
pub fn insert_left<N: Colored>(arena: &mut [N], root: u32, n: u32, parent: u32) -> u32 {
    debug_assert!(get_l(arena, parent).is_none(), "left slot is occupied");
    detach(arena, n);
    set_l(arena, parent, Some(n));
    set_p(arena, n, Some(parent));
    fixup(arena, root, n)
}

/// Mirror of [`insert_left`].
pub fn insert_right<N: Colored>(arena: &mut [N], root: u32, n: u32, parent: u32) -> u32 {
    debug_assert!(get_r(arena, parent).is_none(), "right slot is occupied");
    detach(arena, n);
    set_r(arena, parent, Some(n));
    set_p(arena, n, Some(parent));
    fixup(arena, root, n)
}

fn detach<N: Colored>(arena: &mut [N], n: u32) {
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_color(arena, n, Color::Red);
}

/// Restores the red-black invariants after `n` was attached as a red leaf.
///
/// Only the red-uncle case moves upward; the rotation cases terminate.
fn fixup<N: Colored>(arena: &mut [N], mut root: u32, mut n: u32) -> u32 {
    loop {
        let Some(mut p) = get_p(arena, n) else {
            trace!(node = n, "insert fixup: reached root");
            set_color(arena, n, Color::Black);
            return root;
        };
        if !arena[p as usize].is_red() {
            return root;
        }

        // A red parent is never the root.
        let g = get_p(arena, p).expect("red parent has a parent");
        let parent_is_left = get_l(arena, g) == Some(p);
        let uncle = if parent_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };

        if let Some(u) = uncle.filter(|&u| arena[u as usize].is_red()) {
            trace!(node = n, grandparent = g, "insert fixup: red uncle, recolor");
            set_color(arena, p, Color::Black);
            set_color(arena, u, Color::Black);
            set_color(arena, g, Color::Red);
            n = g;
            continue;
        }

        // Inner child: rotate it into the outer position first.
        if parent_is_left && get_r(arena, p) == Some(n) {
            trace!(node = n, "insert fixup: inner child, rotate parent left");
            root = rotate_left(arena, root, p);
            p = n;
        } else if !parent_is_left && get_l(arena, p) == Some(n) {
            trace!(node = n, "insert fixup: inner child, rotate parent right");
            root = rotate_right(arena, root, p);
            p = n;
        }

        trace!(node = p, grandparent = g, "insert fixup: outer child, rotate grandparent");
        set_color(arena, p, Color::Black);
        set_color(arena, g, Color::Red);
        root = if parent_is_left {
            rotate_right(arena, root, g)
        } else {
            rotate_left(arena, root, g)
        };
        return root;
    }
}
