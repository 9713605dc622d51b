//! Deletion: predecessor swap, splice, double-black fixup.

use tracing::trace;

use crate::rotate::{rotate_left, rotate_right};
use crate::types::{Color, Colored};
use crate::util::{
    color_of, get_l, get_p, get_r, is_black, is_red, last, replace_child, set_color, set_l, set_p,
    set_r, swap,
};

/// Removes node `n` from the tree rooted at `root` and returns the new root.
///
/// A node with two children first trades places (links and colors) with its
/// in-order predecessor, so the node actually unlinked has at most one child.
/// `n` is left fully detached; its arena slot is not reclaimed here.
pub fn remove<N: Colored>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let mut top = root?;

    if let (Some(l), Some(_)) = (get_l(arena, n), get_r(arena, n)) {
        let pred = last(arena, Some(l)).expect("non-empty left subtree has a maximum");
        top = swap(arena, top, n, pred);
        let (n_color, pred_color) = (color_of(arena, n), color_of(arena, pred));
        set_color(arena, n, pred_color);
        set_color(arena, pred, n_color);
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));

    match child {
        Some(c) => {
            set_p(arena, c, p);
            replace_child(arena, p, n, Some(c));
            if p.is_none() {
                top = c;
            }
            if arena[n as usize].is_black() {
                if is_red(arena, Some(c)) {
                    set_color(arena, c, Color::Black);
                } else {
                    top = fixup(arena, top, c);
                }
            }
        }
        None if p.is_none() => {
            detach(arena, n);
            return None;
        }
        None => {
            // Fix up while `n` still stands in its slot, so the sibling and
            // parent are reachable from it; unlink afterwards.
            if arena[n as usize].is_black() {
                top = fixup(arena, top, n);
            }
            let p = get_p(arena, n);
            replace_child(arena, p, n, None);
        }
    }

    set_color(arena, top, Color::Black);
    detach(arena, n);
    Some(top)
}

fn detach<N: Colored>(arena: &mut [N], n: u32) {
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
}

/// A double-black node has black height >= 1, so its sibling exists.
fn sibling<N: Colored>(arena: &[N], p: u32, x_is_left: bool) -> u32 {
    let s = if x_is_left {
        get_r(arena, p)
    } else {
        get_l(arena, p)
    };
    s.expect("double-black node has a sibling")
}

/// Resolves a black-height deficit ("double black") at `x`.
///
/// Runs as a loop over the current node: the black-sibling-with-black-nephews
/// case under a black parent moves the deficit up one level, every other case
/// either terminates or reshapes into a terminating case.
fn fixup<N: Colored>(arena: &mut [N], mut root: u32, mut x: u32) -> u32 {
    loop {
        let Some(p) = get_p(arena, x) else {
            trace!(node = x, "delete fixup: reached root");
            return root;
        };
        let x_is_left = get_l(arena, p) == Some(x);
        let mut s = sibling(arena, p, x_is_left);

        if arena[s as usize].is_red() {
            trace!(node = x, sibling = s, "delete fixup: red sibling, rotate parent");
            set_color(arena, s, Color::Black);
            set_color(arena, p, Color::Red);
            root = if x_is_left {
                rotate_left(arena, root, p)
            } else {
                rotate_right(arena, root, p)
            };
            s = sibling(arena, p, x_is_left);
        }

        let (near, far) = if x_is_left {
            (get_l(arena, s), get_r(arena, s))
        } else {
            (get_r(arena, s), get_l(arena, s))
        };

        if is_black(arena, near) && is_black(arena, far) {
            set_color(arena, s, Color::Red);
            if arena[p as usize].is_red() {
                trace!(node = x, parent = p, "delete fixup: red parent absorbs deficit");
                set_color(arena, p, Color::Black);
                return root;
            }
            trace!(node = x, parent = p, "delete fixup: propagate to parent");
            x = p;
            continue;
        }

        let far = if is_black(arena, far) {
            trace!(node = x, sibling = s, "delete fixup: red near nephew, rotate sibling");
            let near = near.expect("red near nephew exists");
            set_color(arena, near, Color::Black);
            set_color(arena, s, Color::Red);
            root = if x_is_left {
                rotate_right(arena, root, s)
            } else {
                rotate_left(arena, root, s)
            };
            let far = s;
            s = near;
            far
        } else {
            far.expect("red far nephew exists")
        };

        trace!(node = x, sibling = s, "delete fixup: red far nephew, rotate parent");
        let parent_color = color_of(arena, p);
        set_color(arena, s, parent_color);
        set_color(arena, p, Color::Black);
        set_color(arena, far, Color::Black);
        return if x_is_left {
            rotate_left(arena, root, p)
        } else {
            rotate_right(arena, root, p)
        };
    }
}
