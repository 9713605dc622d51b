//! Rotation primitives.
//!
//! Both rotations preserve in-order sequence and rewrite all four affected
//! back-references. They are root-aware: when the rotated node was the root,
//! the promoted child is returned as the new root.

use crate::types::Node;
use crate::util::{get_l, get_p, get_r, replace_child, set_l, set_p, set_r};

/// Promotes `n.r` into `n`'s position; `n` becomes its left child.
///
/// ```text
///     n                c
///    / \              / \
///   a   c     =>     n   z
///      / \          / \
///     y   z        a   y
/// ```
///
/// # Panics
///
/// If `n` has no right child.
pub fn rotate_left<N: Node>(arena: &mut [N], root: u32, n: u32) -> u32 {
    let c = get_r(arena, n).expect("rotate_left requires a right child");
    let p = get_p(arena, n);
    let cl = get_l(arena, c);

    set_r(arena, n, cl);
    if let Some(cl) = cl {
        set_p(arena, cl, Some(n));
    }

    set_p(arena, c, p);
    replace_child(arena, p, n, Some(c));

    set_l(arena, c, Some(n));
    set_p(arena, n, Some(c));

    if root == n {
        c
    } else {
        root
    }
}

/// Mirror of [`rotate_left`]: promotes `n.l`; `n` becomes its right child.
///
/// # Panics
///
/// If `n` has no left child.
pub fn rotate_right<N: Node>(arena: &mut [N], root: u32, n: u32) -> u32 {
    let c = get_l(arena, n).expect("rotate_right requires a left child");
    let p = get_p(arena, n);
    let cr = get_r(arena, c);

    set_l(arena, n, cr);
    if let Some(cr) = cr {
        set_p(arena, cr, Some(n));
    }

    set_p(arena, c, p);
    replace_child(arena, p, n, Some(c));

    set_r(arena, c, Some(n));
    set_p(arena, n, Some(c));

    if root == n {
        c
    } else {
        root
    }
}
